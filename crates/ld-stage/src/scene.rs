//! Scenes and draw status
//!
//! Two independent single-valued states: the `Scene` chooses which top-level
//! view the presentation shows, the `DrawStatus` tracks where the current
//! draw is.

use serde::{Deserialize, Serialize};

/// Top-level stage of the ceremony
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Scene {
    /// Curtain down, waiting for the first advance
    #[default]
    CurtainClosed,
    /// Curtain animating open; advances are ignored
    CurtainOpening,
    /// Standby after the curtain opens
    Ready,
    /// A draw is being dramatized
    Suspense,
    /// The last winner is on screen
    Reveal,
    /// All winners on one wall
    WinnersWall,
    /// Closing scene
    ThankYou,
}

impl Scene {
    pub const ALL: [Scene; 7] = [
        Scene::CurtainClosed,
        Scene::CurtainOpening,
        Scene::Ready,
        Scene::Suspense,
        Scene::Reveal,
        Scene::WinnersWall,
        Scene::ThankYou,
    ];

    /// Stable identifier, matches the serialized form
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::CurtainClosed => "curtain-closed",
            Self::CurtainOpening => "curtain-opening",
            Self::Ready => "ready",
            Self::Suspense => "suspense",
            Self::Reveal => "reveal",
            Self::WinnersWall => "winners-wall",
            Self::ThankYou => "thank-you",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::CurtainClosed => "Curtain",
            Self::CurtainOpening => "Curtain Opening",
            Self::Ready => "Ready",
            Self::Suspense => "Suspense",
            Self::Reveal => "Reveal",
            Self::WinnersWall => "Winners Wall",
            Self::ThankYou => "Thank You",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.type_name() == name)
    }

    /// Whether the running winners sidebar belongs on screen
    pub fn shows_winners_sidebar(&self) -> bool {
        matches!(self, Self::Ready | Self::Suspense | Self::Reveal)
    }
}

/// Status of the draw in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DrawStatus {
    #[default]
    Idle,
    /// Counting down to the next draw
    Countdown,
    /// A candidate is being presented
    Drawing,
    /// The candidate has been committed and is on display
    WinnerDisplay,
    /// Timers frozen; see `DrawStateManager::resume`
    Paused,
}

impl DrawStatus {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Countdown => "countdown",
            Self::Drawing => "drawing",
            Self::WinnerDisplay => "winner-display",
            Self::Paused => "paused",
        }
    }

    /// States that can be paused
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Countdown | Self::Drawing | Self::WinnerDisplay)
    }
}
