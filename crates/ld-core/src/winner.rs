//! Winner records

use std::collections::HashSet;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// An awarded prize
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Winner {
    /// Prize number shown to the audience
    pub prize_number: u32,
    /// Winning ticket
    pub ticket_number: u32,
    /// When the winner was decided
    pub timestamp: DateTime<Local>,
}

impl Winner {
    /// Create a winner stamped with the current local time
    pub fn new(prize_number: u32, ticket_number: u32) -> Self {
        Self::at(prize_number, ticket_number, Local::now())
    }

    pub fn at(prize_number: u32, ticket_number: u32, timestamp: DateTime<Local>) -> Self {
        Self {
            prize_number,
            ticket_number,
            timestamp,
        }
    }

    /// Short clock label, e.g. `02:35 PM`
    pub fn time_label(&self) -> String {
        self.timestamp.format("%I:%M %p").to_string()
    }
}

/// Tickets already awarded in a winners list
pub fn awarded_tickets(winners: &[Winner]) -> HashSet<u32> {
    winners.iter().map(|w| w.ticket_number).collect()
}
