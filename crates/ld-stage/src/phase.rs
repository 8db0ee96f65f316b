//! Presentation phases
//!
//! A phase is the animated style used to dramatize one draw. The engine
//! only picks which one runs; rendering it is the presentation's job.

use serde::{Deserialize, Serialize};

/// Draw animation style shown while the status is `drawing`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhaseType {
    /// Radar sweep that locks onto the ticket
    Radar,
    /// Flight HUD descending onto the ticket
    Flight,
    /// Combined flight path on a radar screen
    FlightRadar,
}

impl PhaseType {
    pub const ALL: [PhaseType; 3] = [PhaseType::Radar, PhaseType::Flight, PhaseType::FlightRadar];

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Radar => "radar",
            Self::Flight => "flight",
            Self::FlightRadar => "flightRadar",
        }
    }
}

/// Suspense style used by the stage view before a reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuspenseStyle {
    Lines,
    Particles,
    Digits,
}

impl SuspenseStyle {
    pub const ALL: [SuspenseStyle; 3] = [
        SuspenseStyle::Lines,
        SuspenseStyle::Particles,
        SuspenseStyle::Digits,
    ];

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::Particles => "particles",
            Self::Digits => "digits",
        }
    }
}

/// Named step inside a phase script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStep {
    // radar
    Scanning,
    Locking,
    Locked,
    // flight
    Descending,
    Approaching,
    Landing,
    Landed,
    // flight radar
    Takeoff,
    Approach,
    Lock,
    // shared
    Suspense,
    Reveal,
}

impl PhaseStep {
    /// Whether the final ticket number is visible during this step
    pub fn shows_final_number(&self) -> bool {
        matches!(self, Self::Reveal | Self::Landed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_serialization() {
        assert_eq!(
            serde_json::to_string(&PhaseType::FlightRadar).unwrap(),
            "\"flightRadar\""
        );
        let phase: PhaseType = serde_json::from_str("\"radar\"").unwrap();
        assert_eq!(phase, PhaseType::Radar);
        for phase in PhaseType::ALL {
            assert_eq!(
                serde_json::to_string(&phase).unwrap(),
                format!("\"{}\"", phase.type_name())
            );
        }
    }

    #[test]
    fn test_final_number_steps() {
        assert!(PhaseStep::Reveal.shows_final_number());
        assert!(PhaseStep::Landed.shows_final_number());
        assert!(!PhaseStep::Scanning.shows_final_number());
        assert!(!PhaseStep::Lock.shows_final_number());
    }
}
