//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;
use tempo_shared::AppError;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Both a project and a category filter were given.
    #[error("Filter by project or by category, not both")]
    ConflictingFilters,

    /// CSV rendering failed.
    #[error("Failed to render CSV: {0}")]
    Export(String),
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Export(msg) => Self::Internal(msg),
            other => Self::Validation(other.to_string()),
        }
    }
}
