//! Leave error types.

use chrono::NaiveDate;
use thiserror::Error;
use tempo_shared::AppError;

/// Leave-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaveError {
    /// The day is already marked as leave.
    #[error("Leave already recorded for {0}")]
    AlreadyMarked(NaiveDate),

    /// No leave marker for that day.
    #[error("No leave recorded for {0}")]
    NotMarked(NaiveDate),

    /// Caller tried to manage another user's leave.
    #[error("Only administrators can manage leave for other users")]
    Forbidden,

    /// Range start after range end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },
}

impl From<LeaveError> for AppError {
    fn from(err: LeaveError) -> Self {
        let message = err.to_string();
        match err {
            LeaveError::AlreadyMarked(_) => Self::Conflict(message),
            LeaveError::NotMarked(_) => Self::NotFound(message),
            LeaveError::Forbidden => Self::Forbidden(message),
            LeaveError::InvalidRange { .. } => Self::Validation(message),
        }
    }
}
