//! Timing profiles for the ceremony
//!
//! Every delay the engine schedules comes from a `CeremonyTiming`. The
//! presentation can render at whatever speed it likes; these values decide
//! when state changes.

use serde::{Deserialize, Serialize};

/// Timing profile identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimingProfile {
    /// Live ceremony pacing
    #[default]
    Normal,
    /// Faster run-through for rehearsals
    Rehearsal,
    /// No delays (tests, headless simulation)
    Instant,
    /// Scaled from another profile
    Custom,
}

impl TimingProfile {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Rehearsal => "Rehearsal",
            Self::Instant => "Instant",
            Self::Custom => "Custom",
        }
    }
}

/// Delay configuration (all values in milliseconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeremonyTiming {
    pub profile: TimingProfile,
    /// Curtain opening animation before `ready`
    pub curtain_open_ms: u64,
    /// Visual reset pause between clearing a draw and starting the next one
    pub draw_next_delay_ms: u64,
    /// Window in which repeated advance signals collapse into one
    pub advance_debounce_ms: u64,
    /// Suspense animation length on the stage view
    pub suspense_duration_ms: u64,
    /// Hold on the revealed number before a phase reports completion
    pub completion_hold_ms: u64,
    /// One countdown step
    pub countdown_tick_ms: u64,
    /// Animation frame interval used by phase scripts
    pub frame_interval_ms: u64,
}

impl Default for CeremonyTiming {
    fn default() -> Self {
        Self::normal()
    }
}

impl CeremonyTiming {
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            curtain_open_ms: 3500,
            draw_next_delay_ms: 500,
            advance_debounce_ms: 600,
            suspense_duration_ms: 6000,
            completion_hold_ms: 2000,
            countdown_tick_ms: 1000,
            frame_interval_ms: 50,
        }
    }

    pub fn rehearsal() -> Self {
        Self {
            profile: TimingProfile::Rehearsal,
            ..Self::normal().scaled(0.25)
        }
    }

    /// Zero delays; debounce also disabled so scripted advances all land
    pub fn instant() -> Self {
        Self {
            profile: TimingProfile::Instant,
            curtain_open_ms: 0,
            draw_next_delay_ms: 0,
            advance_debounce_ms: 0,
            suspense_duration_ms: 0,
            completion_hold_ms: 0,
            countdown_tick_ms: 0,
            frame_interval_ms: 0,
        }
    }

    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal | TimingProfile::Custom => Self::normal(),
            TimingProfile::Rehearsal => Self::rehearsal(),
            TimingProfile::Instant => Self::instant(),
        }
    }

    /// Scale every animation delay by `factor` (< 1.0 = faster).
    ///
    /// The debounce window is input handling, not animation, and is kept.
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = |ms: u64| (ms as f64 * factor.max(0.0)).round() as u64;
        Self {
            profile: TimingProfile::Custom,
            curtain_open_ms: scale(self.curtain_open_ms),
            draw_next_delay_ms: scale(self.draw_next_delay_ms),
            advance_debounce_ms: self.advance_debounce_ms,
            suspense_duration_ms: scale(self.suspense_duration_ms),
            completion_hold_ms: scale(self.completion_hold_ms),
            countdown_tick_ms: scale(self.countdown_tick_ms),
            frame_interval_ms: scale(self.frame_interval_ms),
        }
    }
}
