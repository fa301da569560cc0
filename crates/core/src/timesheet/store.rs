//! Storage boundary for timesheet entries and project counters.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use tempo_shared::types::{CategoryId, EntryId, ProjectId, UserId};

use crate::accounting::CounterDelta;
use crate::entry::Entry;
use crate::project::Project;

/// Storage failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness or concurrency conflict.
    #[error("Storage conflict: {0}")]
    Conflict(String),

    /// A counter delta targeted a project that does not exist.
    #[error("Project counter not found: {0}")]
    MissingCounter(ProjectId),

    /// Any other backend failure.
    #[error("Storage error: {0}")]
    Backend(String),
}

/// Entry lookup filter. All fields are optional and combined with AND.
#[derive(Debug, Clone, Default)]
pub struct EntryQuery {
    /// Owner.
    pub owner_id: Option<UserId>,
    /// Project.
    pub project_id: Option<ProjectId>,
    /// Category.
    pub category_id: Option<CategoryId>,
    /// First day (inclusive).
    pub start_date: Option<NaiveDate>,
    /// Last day (inclusive).
    pub end_date: Option<NaiveDate>,
    /// Include soft-deleted entries.
    pub include_deleted: bool,
}

impl EntryQuery {
    /// Live entries of `owner_id` on `date`.
    #[must_use]
    pub fn day(owner_id: UserId, date: NaiveDate) -> Self {
        Self {
            owner_id: Some(owner_id),
            start_date: Some(date),
            end_date: Some(date),
            ..Self::default()
        }
    }

    /// Returns true if `entry` satisfies the filter.
    #[must_use]
    pub fn matches(&self, entry: &Entry) -> bool {
        (self.include_deleted || !entry.is_deleted)
            && self.owner_id.is_none_or(|o| o == entry.owner_id)
            && self
                .project_id
                .is_none_or(|p| entry.target.project_id() == Some(p))
            && self
                .category_id
                .is_none_or(|c| entry.target.category_id() == Some(c))
            && self.start_date.is_none_or(|d| entry.date >= d)
            && self.end_date.is_none_or(|d| entry.date <= d)
    }
}

/// One entry row write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryWrite {
    /// New row.
    Insert(Entry),
    /// Replace the row with the same ID, provided it still has the
    /// accounting state of `previous`. A mismatch is a
    /// [`StoreError::Conflict`] and nothing in the change is applied.
    Update {
        /// The row as it was read before planning the change.
        previous: Entry,
        /// The row to write.
        next: Entry,
    },
}

impl EntryWrite {
    /// The row this write leaves behind.
    pub fn entry(&self) -> &Entry {
        match self {
            Self::Insert(entry) | Self::Update { next: entry, .. } => entry,
        }
    }
}

/// Returns true if `stored` still carries the fields counter deltas were
/// planned from: soft-delete flag, target, and duration.
pub fn accounting_matches(stored: &Entry, previous: &Entry) -> bool {
    stored.is_deleted == previous.is_deleted
        && stored.target == previous.target
        && stored.duration == previous.duration
}

/// Entry writes and counter deltas that must be applied together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryChange {
    /// Entry rows to write.
    pub writes: Vec<EntryWrite>,
    /// Counter deltas to apply, in order.
    pub deltas: Vec<CounterDelta>,
}

/// Persistence used by the timesheet service.
#[async_trait]
pub trait TimesheetStore: Send + Sync {
    /// Finds an entry by ID, deleted or not.
    async fn find_entry(&self, id: EntryId) -> Result<Option<Entry>, StoreError>;

    /// Finds a project by ID, deleted or not.
    async fn find_project(&self, id: ProjectId) -> Result<Option<Project>, StoreError>;

    /// Returns true if the category exists.
    async fn category_exists(&self, id: CategoryId) -> Result<bool, StoreError>;

    /// Returns true if `user_id` is assigned to `project_id`.
    async fn is_assigned(&self, user_id: UserId, project_id: ProjectId) -> Result<bool, StoreError>;

    /// Lists entries matching `query`, newest date first.
    async fn list_entries(&self, query: &EntryQuery) -> Result<Vec<Entry>, StoreError>;

    /// Applies every write and delta of `change` atomically.
    ///
    /// Deltas are increments (`used = used + delta`), never read-modify-write.
    /// An update whose row no longer matches its `previous` state fails with
    /// [`StoreError::Conflict`]. On error nothing is applied.
    async fn commit(&self, change: EntryChange) -> Result<(), StoreError>;
}
