//! Advance input
//!
//! Key presses, pointer clicks and touches all collapse into a single
//! "advance" signal. Hosts often deliver the same physical action through
//! more than one channel, so accepted advances are debounced.

use serde::{Deserialize, Serialize};

/// Key codes that advance the ceremony
pub const ADVANCE_KEYS: [&str; 4] = ["Space", "Enter", "ArrowRight", "PageDown"];

/// Raw input from the presentation host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AdvanceInput {
    /// Keyboard event, by key code (`Space`, `Enter`, ...)
    Key { code: String },
    Click,
    Touch,
}

impl AdvanceInput {
    pub fn key(code: impl Into<String>) -> Self {
        Self::Key { code: code.into() }
    }

    /// Whether this input is an advance at all
    pub fn triggers_advance(&self) -> bool {
        match self {
            Self::Key { code } => ADVANCE_KEYS.contains(&code.as_str()) || code == " ",
            Self::Click | Self::Touch => true,
        }
    }
}

/// Collapses advances that arrive within `window_ms` of the last accepted one
#[derive(Debug, Clone)]
pub struct AdvanceDebouncer {
    window_ms: u64,
    last_accepted: Option<u64>,
}

impl AdvanceDebouncer {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_accepted: None,
        }
    }

    /// Record an advance at `now_ms`; false if it falls inside the window
    pub fn accept(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_accepted
            && now_ms.saturating_sub(last) < self.window_ms
        {
            return false;
        }
        self.last_accepted = Some(now_ms);
        true
    }

    pub fn reset(&mut self) {
        self.last_accepted = None;
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }
}
