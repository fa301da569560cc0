//! Timesheet error types.

use chrono::NaiveDate;
use thiserror::Error;
use tempo_shared::AppError;
use tempo_shared::types::{CategoryId, EntryId, ProjectId};

use super::store::StoreError;
use crate::entry::EntryError;

/// Errors that can occur during entry mutations.
#[derive(Debug, Error)]
pub enum TimesheetError {
    /// Invalid input.
    #[error(transparent)]
    Invalid(#[from] EntryError),

    /// Entry missing or soft-deleted.
    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),

    /// Project missing or soft-deleted.
    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Category missing.
    #[error("Category not found: {0}")]
    CategoryNotFound(CategoryId),

    /// Owner not assigned to the project.
    #[error("You are not assigned to this project")]
    NotAssigned(ProjectId),

    /// Acting on someone else's entries without being admin.
    #[error("You can only manage your own entries")]
    NotOwner,

    /// Restore of an entry that is not deleted.
    #[error("Entry is not deleted: {0}")]
    NotDeleted(EntryId),

    /// Range start after range end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Copy source day has no entries.
    #[error("No entries found for {0}")]
    NothingToCopy(NaiveDate),

    /// Copy target day already has entries.
    #[error("{0} already has entries. Delete them first to copy")]
    TargetDayNotEmpty(NaiveDate),

    /// Storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<TimesheetError> for AppError {
    fn from(err: TimesheetError) -> Self {
        let message = err.to_string();
        match err {
            TimesheetError::Invalid(_) | TimesheetError::InvalidRange { .. } => {
                Self::Validation(message)
            }
            TimesheetError::EntryNotFound(_)
            | TimesheetError::ProjectNotFound(_)
            | TimesheetError::CategoryNotFound(_)
            | TimesheetError::NothingToCopy(_) => Self::NotFound(message),
            TimesheetError::NotAssigned(_) | TimesheetError::NotOwner => Self::Forbidden(message),
            TimesheetError::NotDeleted(_) | TimesheetError::TargetDayNotEmpty(_) => {
                Self::Conflict(message)
            }
            TimesheetError::Store(StoreError::Conflict(msg)) => Self::Conflict(msg),
            TimesheetError::Store(_) => Self::Database(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_to_app_errors() {
        let cases: Vec<(TimesheetError, u16)> = vec![
            (EntryError::MissingTarget.into(), 400),
            (TimesheetError::EntryNotFound(EntryId::new()), 404),
            (TimesheetError::NothingToCopy(NaiveDate::MIN), 404),
            (TimesheetError::NotAssigned(ProjectId::new()), 403),
            (TimesheetError::NotOwner, 403),
            (TimesheetError::TargetDayNotEmpty(NaiveDate::MIN), 409),
            (StoreError::Conflict("dup".into()).into(), 409),
            (StoreError::Backend("down".into()).into(), 500),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_validation_message_passes_through() {
        let app: AppError = TimesheetError::from(EntryError::TooFarInPast { limit_days: 7 }).into();
        assert_eq!(
            app.public_message(),
            "Cannot log time for dates more than 7 days in the past"
        );
    }
}
