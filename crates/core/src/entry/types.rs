//! Entry data types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tempo_shared::types::{CategoryId, EntryId, MINUTES_PER_HOUR, ProjectId, UserId};

use super::error::EntryError;
use super::validation::round_minutes;

/// What an entry is booked against.
///
/// Project entries are billable and count toward the project's budget.
/// Category entries are internal and never touch a project counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum EntryTarget {
    /// Billable time on a project.
    Project(ProjectId),
    /// Internal time on a category.
    Category(CategoryId),
}

impl EntryTarget {
    /// Returns the project, if this is a project entry.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        match self {
            Self::Project(id) => Some(*id),
            Self::Category(_) => None,
        }
    }

    /// Returns the category, if this is a category entry.
    #[must_use]
    pub const fn category_id(&self) -> Option<CategoryId> {
        match self {
            Self::Project(_) => None,
            Self::Category(id) => Some(*id),
        }
    }

    /// Returns true for project (billable) entries.
    #[must_use]
    pub const fn is_billable(&self) -> bool {
        matches!(self, Self::Project(_))
    }
}

/// Logged duration, with minutes always on a 15-minute slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDuration {
    /// Whole hours.
    pub hours: i32,
    /// Minutes, one of 0, 15, 30, 45.
    pub minutes: i32,
}

impl EntryDuration {
    /// Validates raw input and rounds minutes to the nearest 15.
    ///
    /// A rounded value of 60 carries into the hours (`2:53` becomes `3:00`).
    pub fn new(hours: i32, minutes: i32) -> Result<Self, EntryError> {
        if !(0..=24).contains(&hours) {
            return Err(EntryError::InvalidHours(hours));
        }
        if !(0..=59).contains(&minutes) {
            return Err(EntryError::InvalidMinutes(minutes));
        }

        let rounded = round_minutes(minutes);
        let (hours, minutes) = if rounded == 60 {
            (hours + 1, 0)
        } else {
            (hours, rounded)
        };

        if hours > 24 {
            return Err(EntryError::DurationTooLong);
        }

        Ok(Self { hours, minutes })
    }

    /// Total length in minutes.
    #[must_use]
    pub fn total_minutes(&self) -> i64 {
        i64::from(self.hours) * MINUTES_PER_HOUR + i64::from(self.minutes)
    }
}

/// A timesheet entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry ID.
    pub id: EntryId,
    /// User the time belongs to.
    pub owner_id: UserId,
    /// Project or category.
    pub target: EntryTarget,
    /// Business date.
    pub date: NaiveDate,
    /// Logged duration.
    pub duration: EntryDuration,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Total length in minutes.
    #[must_use]
    pub fn total_minutes(&self) -> i64 {
        self.duration.total_minutes()
    }

    /// Returns true if the entry is live (not soft-deleted).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

/// Input for creating an entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEntryInput {
    /// Owner; defaults to the caller. Only admins may set someone else.
    pub owner_id: Option<UserId>,
    /// Project to book against.
    pub project_id: Option<ProjectId>,
    /// Category to book against.
    pub category_id: Option<CategoryId>,
    /// Business date.
    pub date: NaiveDate,
    /// Whole hours.
    pub hours: i32,
    /// Minutes before rounding.
    pub minutes: i32,
    /// Free-form notes.
    pub notes: Option<String>,
}

/// Partial update of an entry. `None` keeps the current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEntryInput {
    /// Move the entry to this project.
    pub project_id: Option<ProjectId>,
    /// Move the entry to this category.
    pub category_id: Option<CategoryId>,
    /// New business date.
    pub date: Option<NaiveDate>,
    /// New hours.
    pub hours: Option<i32>,
    /// New minutes before rounding.
    pub minutes: Option<i32>,
    /// New notes; an empty string clears them.
    pub notes: Option<String>,
}
