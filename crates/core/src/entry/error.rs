//! Entry validation errors.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while validating entry input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// Hours outside 0..=24.
    #[error("Hours must be between 0 and 24, got {0}")]
    InvalidHours(i32),

    /// Minutes outside 0..=59.
    #[error("Minutes must be between 0 and 59, got {0}")]
    InvalidMinutes(i32),

    /// Rounding carried the duration past 24 hours.
    #[error("Duration cannot exceed 24 hours")]
    DurationTooLong,

    /// Notes longer than the allowed limit.
    #[error("Notes cannot exceed {max} characters")]
    NotesTooLong {
        /// Maximum number of characters.
        max: usize,
    },

    /// Neither a project nor a category was given.
    #[error("Either project or category must be specified")]
    MissingTarget,

    /// Both a project and a category were given.
    #[error("An entry cannot have both a project and a category")]
    AmbiguousTarget,

    /// Date is older than the backdate window.
    #[error("Cannot log time for dates more than {limit_days} days in the past")]
    TooFarInPast {
        /// Configured window in days.
        limit_days: i64,
    },

    /// Date is after today and future dates are disabled.
    #[error("Cannot log time for a future date: {0}")]
    FutureDate(NaiveDate),
}
