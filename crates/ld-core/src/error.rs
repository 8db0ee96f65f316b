//! Error types for the lucky draw engine

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum LdError {
    #[error("No more unique tickets available in {start}..={end}")]
    PoolExhausted { start: u32, end: u32 },

    #[error("All {0} prizes have been drawn")]
    AllPrizesDrawn(u32),

    #[error("A draw is already in progress (status: {0})")]
    DrawInProgress(&'static str),

    #[error("No draw is waiting to be completed")]
    NoActiveDraw,

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Scene {0} needs at least one winner")]
    NeedsWinners(&'static str),

    #[error("No winners to export")]
    NoWinners,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LdError {
    /// Whether this error is a precondition notice for the operator
    /// rather than a failure of the engine itself.
    pub fn is_notice(&self) -> bool {
        matches!(
            self,
            Self::AllPrizesDrawn(_)
                | Self::DrawInProgress(_)
                | Self::NoActiveDraw
                | Self::NeedsWinners(_)
                | Self::NoWinners
        )
    }
}

/// Result type alias
pub type LdResult<T> = Result<T, LdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LdError::PoolExhausted { start: 1, end: 3 };
        assert_eq!(err.to_string(), "No more unique tickets available in 1..=3");

        let err = LdError::AllPrizesDrawn(5);
        assert_eq!(err.to_string(), "All 5 prizes have been drawn");
    }

    #[test]
    fn test_notice_classification() {
        assert!(LdError::AllPrizesDrawn(3).is_notice());
        assert!(LdError::DrawInProgress("drawing").is_notice());
        assert!(!LdError::PoolExhausted { start: 1, end: 1 }.is_notice());
        assert!(!LdError::InvalidSettings("x".into()).is_notice());
    }
}
