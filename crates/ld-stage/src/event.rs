//! Ceremony Events
//!
//! Journal of everything the presentation layer may want to react to.
//! The engine appends, the host drains.

use serde::{Deserialize, Serialize};

use crate::phase::{PhaseStep, PhaseType, SuspenseStyle};
use crate::scene::{DrawStatus, Scene};

/// Something that happened during the ceremony
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CeremonyEvent {
    SceneChanged {
        from: Scene,
        to: Scene,
    },
    StatusChanged {
        from: DrawStatus,
        to: DrawStatus,
    },
    /// A candidate was selected and is being presented
    DrawStarted {
        draw_index: usize,
        prize_number: u32,
        ticket_number: u32,
        phase: PhaseType,
    },
    /// The candidate became a permanent winner
    WinnerCommitted {
        prize_number: u32,
        ticket_number: u32,
    },
    CountdownTick {
        remaining: u32,
    },
    SuspenseStyleChosen {
        style: SuspenseStyle,
    },
    PhaseStep {
        step: PhaseStep,
    },
    SettingsApplied,
    Paused,
    Resumed,
    Reset,
    /// Operator-facing message (precondition failures, exhausted pool, ...)
    Notice {
        message: String,
    },
}

impl CeremonyEvent {
    pub fn notice(message: impl Into<String>) -> Self {
        Self::Notice {
            message: message.into(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SceneChanged { .. } => "scene_changed",
            Self::StatusChanged { .. } => "status_changed",
            Self::DrawStarted { .. } => "draw_started",
            Self::WinnerCommitted { .. } => "winner_committed",
            Self::CountdownTick { .. } => "countdown_tick",
            Self::SuspenseStyleChosen { .. } => "suspense_style_chosen",
            Self::PhaseStep { .. } => "phase_step",
            Self::SettingsApplied => "settings_applied",
            Self::Paused => "paused",
            Self::Resumed => "resumed",
            Self::Reset => "reset",
            Self::Notice { .. } => "notice",
        }
    }
}

/// An event with the host time it was recorded at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampedEvent {
    pub timestamp_ms: u64,
    pub event: CeremonyEvent,
}

/// Append-only buffer drained by the host
#[derive(Debug, Clone, Default)]
pub struct EventJournal {
    events: Vec<StampedEvent>,
}

impl EventJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, timestamp_ms: u64, event: CeremonyEvent) {
        log::debug!("[journal] {} @ {}ms", event.type_name(), timestamp_ms);
        self.events.push(StampedEvent {
            timestamp_ms,
            event,
        });
    }

    /// Take everything recorded so far
    pub fn drain(&mut self) -> Vec<StampedEvent> {
        std::mem::take(&mut self.events)
    }

    /// Move all events from another journal into this one, keeping order
    pub fn absorb(&mut self, other: &mut EventJournal) {
        self.events.append(&mut other.events);
    }

    pub fn iter(&self) -> impl Iterator<Item = &CeremonyEvent> {
        self.events.iter().map(|e| &e.event)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
