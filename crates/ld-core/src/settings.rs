//! Draw Settings
//!
//! The configuration describing the draw universe:
//! - Ticket range (inclusive bounds)
//! - Prize count and numbering direction
//! - Duplicate policy
//! - Countdown and display pass-through options
//!
//! Serialized with camelCase keys so a stored entry reads the same as the
//! operator-facing field names (`ticketStart`, `numberOfPrizes`, ...).

use serde::{Deserialize, Serialize};

use crate::error::{LdError, LdResult};

/// Direction in which prize numbers are assigned as draws happen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PrizeOrder {
    /// Prize 1, 2, 3, ...
    #[default]
    Ascending,
    /// Prize N, N-1, ..., 1
    Descending,
}

impl PrizeOrder {
    /// Prize number for the draw that happens after `drawn` winners exist
    pub fn prize_number(&self, drawn: usize, number_of_prizes: u32) -> u32 {
        let drawn = u32::try_from(drawn).unwrap_or(u32::MAX);
        match self {
            Self::Ascending => drawn.saturating_add(1),
            Self::Descending => number_of_prizes.saturating_sub(drawn),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ascending => "Ascending (1 → 2 → 3)",
            Self::Descending => "Descending (3 → 2 → 1)",
        }
    }
}

/// Visual theme (opaque to the engine)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    BlueGold,
    GreenGold,
    PurpleNeon,
}

/// Draw configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DrawSettings {
    /// Number of prizes (draws) in the session
    pub number_of_prizes: u32,
    /// First ticket number (inclusive)
    pub ticket_start: u32,
    /// Last ticket number (inclusive)
    pub ticket_end: u32,
    /// Countdown length before each follow-up draw
    pub countdown_seconds: u32,
    /// Run a countdown between draws
    pub enable_countdown: bool,
    /// Tickets may win more than once
    pub allow_duplicates: bool,
    /// Minimum distance between winning tickets. Stored but not enforced
    /// by the selector.
    pub min_gap: u32,
    /// Prize numbering direction
    pub prize_order: PrizeOrder,
    pub enable_sound: bool,
    pub theme: Theme,
    pub custom_message: String,
    pub demo_mode: bool,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            number_of_prizes: 5,
            ticket_start: 1,
            ticket_end: 500,
            countdown_seconds: 10,
            enable_countdown: false,
            allow_duplicates: false,
            min_gap: 0,
            prize_order: PrizeOrder::Ascending,
            enable_sound: true,
            theme: Theme::BlueGold,
            custom_message: "Welcome to the Lucky Draw".to_string(),
            demo_mode: false,
        }
    }
}

impl DrawSettings {
    /// Settings for a range and prize count, everything else default
    pub fn with_range(ticket_start: u32, ticket_end: u32, number_of_prizes: u32) -> Self {
        Self {
            ticket_start,
            ticket_end,
            number_of_prizes,
            ..Self::default()
        }
    }

    /// Number of tickets in the range (0 when the bounds are inverted)
    pub fn total_tickets(&self) -> u64 {
        if self.ticket_start > self.ticket_end {
            0
        } else {
            u64::from(self.ticket_end) - u64::from(self.ticket_start) + 1
        }
    }

    /// Whether a ticket lies inside the configured range
    pub fn contains(&self, ticket: u32) -> bool {
        (self.ticket_start..=self.ticket_end).contains(&ticket)
    }

    /// Check the structural invariants.
    ///
    /// The prize count is not compared against the number of
    /// unique tickets here; that condition surfaces as an exhausted pool.
    pub fn validate(&self) -> LdResult<()> {
        if self.ticket_start > self.ticket_end {
            return Err(LdError::InvalidSettings(format!(
                "ticket start {} is after ticket end {}",
                self.ticket_start, self.ticket_end
            )));
        }
        if self.number_of_prizes == 0 {
            return Err(LdError::InvalidSettings(
                "number of prizes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// True when every prize can get its own ticket
    pub fn has_unique_capacity(&self) -> bool {
        self.allow_duplicates || u64::from(self.number_of_prizes) <= self.total_tickets()
    }

    /// Merge a partial update over these settings
    pub fn merged(&self, patch: &SettingsPatch) -> Self {
        let mut next = self.clone();
        if let Some(v) = patch.number_of_prizes {
            next.number_of_prizes = v;
        }
        if let Some(v) = patch.ticket_start {
            next.ticket_start = v;
        }
        if let Some(v) = patch.ticket_end {
            next.ticket_end = v;
        }
        if let Some(v) = patch.countdown_seconds {
            next.countdown_seconds = v;
        }
        if let Some(v) = patch.enable_countdown {
            next.enable_countdown = v;
        }
        if let Some(v) = patch.allow_duplicates {
            next.allow_duplicates = v;
        }
        if let Some(v) = patch.min_gap {
            next.min_gap = v;
        }
        if let Some(v) = patch.prize_order {
            next.prize_order = v;
        }
        if let Some(v) = patch.enable_sound {
            next.enable_sound = v;
        }
        if let Some(v) = patch.theme {
            next.theme = v;
        }
        if let Some(v) = &patch.custom_message {
            next.custom_message = v.clone();
        }
        if let Some(v) = patch.demo_mode {
            next.demo_mode = v;
        }
        next
    }
}

/// Partial settings update; `None` fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsPatch {
    pub number_of_prizes: Option<u32>,
    pub ticket_start: Option<u32>,
    pub ticket_end: Option<u32>,
    pub countdown_seconds: Option<u32>,
    pub enable_countdown: Option<bool>,
    pub allow_duplicates: Option<bool>,
    pub min_gap: Option<u32>,
    pub prize_order: Option<PrizeOrder>,
    pub enable_sound: Option<bool>,
    pub theme: Option<Theme>,
    pub custom_message: Option<String>,
    pub demo_mode: Option<bool>,
}

impl SettingsPatch {
    /// The operator panel's edit: range, prize count and order
    pub fn draw_range(
        ticket_start: u32,
        ticket_end: u32,
        number_of_prizes: u32,
        prize_order: PrizeOrder,
    ) -> Self {
        Self {
            ticket_start: Some(ticket_start),
            ticket_end: Some(ticket_end),
            number_of_prizes: Some(number_of_prizes),
            prize_order: Some(prize_order),
            min_gap: Some(0),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
