//! Error types for phase lookups.

use chrono::NaiveDate;

/// Result type for phase lookup operations
pub type PhaseResult<T> = Result<T, PhaseError>;

/// Error type for phase lookup operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhaseError {
    /// The phase dataset is missing, malformed, or violates table ordering.
    #[error("Phase data error: {0}")]
    Data(String),

    #[error("Date {date} is outside the supported range {earliest} to {latest}")]
    OutOfRange {
        date: NaiveDate,
        earliest: NaiveDate,
        latest: NaiveDate,
    },

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PhaseError {
    pub(crate) fn data(msg: impl Into<String>) -> Self {
        PhaseError::Data(msg.into())
    }

    /// Whether the caller can recover by changing the query arguments.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, PhaseError::Data(_))
    }
}
