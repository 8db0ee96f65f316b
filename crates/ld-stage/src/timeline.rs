//! Phase Timelines
//!
//! Each presentation phase is a fixed script of steps laid over its total
//! length, followed by a hold on the revealed number. A `PhaseTimeline`
//! plays one script as explicit timer-driven transitions:
//!
//! ```text
//! Idle ──start──► Running(step) ──► ... ──► Holding ──► Completed
//!                      │                       │
//!                      └────────cancel─────────┴──► Cancelled
//! ```
//!
//! Cancelling drops every pending transition, so a superseded timeline can
//! never deliver `Complete`.

use serde::{Deserialize, Serialize};

use crate::phase::{PhaseStep, PhaseType, SuspenseStyle};
use crate::scheduler::TimerQueue;
use crate::timing::CeremonyTiming;

/// Step schedule for one phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseScript {
    /// Length of the animated part (ms)
    pub total_ms: u64,
    /// Hold on the final frame before completion (ms)
    pub hold_ms: u64,
    /// Steps with their start as a fraction of `total_ms`, ascending
    pub steps: Vec<(f64, PhaseStep)>,
}

impl PhaseScript {
    /// Script for a draw phase. Lengths are frame counts at the timing's
    /// frame interval (100, 120 and 200 frames).
    pub fn for_phase(phase: PhaseType, timing: &CeremonyTiming) -> Self {
        let (frames, steps) = match phase {
            PhaseType::Radar => (
                100,
                vec![
                    (0.0, PhaseStep::Scanning),
                    (0.4, PhaseStep::Locking),
                    (0.7, PhaseStep::Locked),
                    (0.85, PhaseStep::Reveal),
                ],
            ),
            PhaseType::Flight => (
                120,
                vec![
                    (0.0, PhaseStep::Descending),
                    (0.5, PhaseStep::Approaching),
                    (0.75, PhaseStep::Landing),
                    (0.95, PhaseStep::Landed),
                ],
            ),
            PhaseType::FlightRadar => (
                200,
                vec![
                    (0.0, PhaseStep::Takeoff),
                    (0.3, PhaseStep::Approach),
                    (0.7, PhaseStep::Lock),
                    (0.9, PhaseStep::Reveal),
                ],
            ),
        };

        Self {
            total_ms: frames * timing.frame_interval_ms,
            hold_ms: timing.completion_hold_ms,
            steps,
        }
    }

    /// Script for a stage-view suspense style: one suspense segment of the
    /// configured length, no hold.
    pub fn for_suspense(_style: SuspenseStyle, timing: &CeremonyTiming) -> Self {
        Self {
            total_ms: timing.suspense_duration_ms,
            hold_ms: 0,
            steps: vec![(0.0, PhaseStep::Suspense)],
        }
    }

    /// Offset of each step from the start (ms)
    pub fn step_offsets(&self) -> impl Iterator<Item = (u64, PhaseStep)> + '_ {
        self.steps
            .iter()
            .map(|(fraction, step)| (((self.total_ms as f64) * fraction).round() as u64, *step))
    }

    /// Step showing at `elapsed_ms` after start
    pub fn step_at(&self, elapsed_ms: u64) -> Option<PhaseStep> {
        self.step_offsets()
            .take_while(|(offset, _)| *offset <= elapsed_ms)
            .last()
            .map(|(_, step)| step)
    }

    /// Start to completion (ms)
    pub fn duration_ms(&self) -> u64 {
        self.total_ms + self.hold_ms
    }
}

/// Transition delivered by `PhaseTimeline::tick`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineCue {
    Step(PhaseStep),
    Hold,
    Complete,
}

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineState {
    Idle,
    Running(PhaseStep),
    Holding,
    Completed,
    Cancelled,
}

/// One playing phase script
#[derive(Debug, Clone)]
pub struct PhaseTimeline {
    script: PhaseScript,
    state: TimelineState,
    timers: TimerQueue<TimelineCue>,
}

impl PhaseTimeline {
    pub fn new(script: PhaseScript) -> Self {
        Self {
            script,
            state: TimelineState::Idle,
            timers: TimerQueue::new(),
        }
    }

    /// Schedule every transition relative to `now_ms`
    pub fn start(&mut self, now_ms: u64) {
        if self.state != TimelineState::Idle {
            return;
        }

        let offsets: Vec<_> = self.script.step_offsets().collect();
        for (offset, step) in offsets {
            self.timers.schedule(now_ms, offset, TimelineCue::Step(step));
        }
        self.timers
            .schedule(now_ms, self.script.total_ms, TimelineCue::Hold);
        self.timers
            .schedule(now_ms, self.script.duration_ms(), TimelineCue::Complete);

        // The first step has offset 0; show it immediately
        if let Some(TimelineCue::Step(step)) = self.timers.pop_due(now_ms) {
            self.state = TimelineState::Running(step);
        }
    }

    /// Deliver every transition due at `now_ms`
    pub fn tick(&mut self, now_ms: u64) -> Vec<TimelineCue> {
        let mut cues = Vec::new();
        while let Some(cue) = self.timers.pop_due(now_ms) {
            self.state = match cue {
                TimelineCue::Step(step) => TimelineState::Running(step),
                TimelineCue::Hold => TimelineState::Holding,
                TimelineCue::Complete => TimelineState::Completed,
            };
            cues.push(cue);
        }
        cues
    }

    /// Drop all pending transitions. A completed timeline stays completed.
    pub fn cancel(&mut self) {
        self.timers.cancel_all();
        if self.state != TimelineState::Completed {
            self.state = TimelineState::Cancelled;
        }
    }

    pub fn pause(&mut self, now_ms: u64) -> bool {
        self.timers.pause(now_ms)
    }

    pub fn resume(&mut self, now_ms: u64) -> bool {
        self.timers.resume(now_ms)
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    pub fn script(&self) -> &PhaseScript {
        &self.script
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            TimelineState::Completed | TimelineState::Cancelled
        )
    }
}
