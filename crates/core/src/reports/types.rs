//! Report data types.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tempo_shared::types::{CategoryId, EntryId, ProjectId, UserId};

use crate::entry::{Entry, EntryTarget};
use crate::leave::UserOnLeave;

/// Report query filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportFilters {
    /// First day (inclusive).
    pub start_date: NaiveDate,
    /// Last day (inclusive).
    pub end_date: NaiveDate,
    /// Only this user's entries.
    pub user_id: Option<UserId>,
    /// Only this project's entries.
    pub project_id: Option<ProjectId>,
    /// Only this category's entries.
    pub category_id: Option<CategoryId>,
}

impl ReportFilters {
    /// Returns true if a live `entry` falls within the filters.
    ///
    /// Soft-deleted entries never match.
    #[must_use]
    pub fn matches(&self, entry: &Entry) -> bool {
        if entry.is_deleted || entry.date < self.start_date || entry.date > self.end_date {
            return false;
        }
        if self.user_id.is_some_and(|user| user != entry.owner_id) {
            return false;
        }
        if self.project_id.is_some_and(|p| entry.target.project_id() != Some(p)) {
            return false;
        }
        if self.category_id.is_some_and(|c| entry.target.category_id() != Some(c)) {
            return false;
        }
        true
    }
}

/// Display names for the IDs appearing in a report.
#[derive(Debug, Clone, Default)]
pub struct NameDirectory {
    /// User display names.
    pub users: HashMap<UserId, String>,
    /// Project names.
    pub projects: HashMap<ProjectId, String>,
    /// Category names.
    pub categories: HashMap<CategoryId, String>,
}

const UNKNOWN: &str = "Unknown";

impl NameDirectory {
    /// User name, or `"Unknown"`.
    #[must_use]
    pub fn user(&self, id: UserId) -> &str {
        self.users.get(&id).map_or(UNKNOWN, String::as_str)
    }

    /// Project name, or `"Unknown"`.
    #[must_use]
    pub fn project(&self, id: ProjectId) -> &str {
        self.projects.get(&id).map_or(UNKNOWN, String::as_str)
    }

    /// Name of an entry's project or category.
    #[must_use]
    pub fn target(&self, target: &EntryTarget) -> &str {
        match target {
            EntryTarget::Project(id) => self.project(*id),
            EntryTarget::Category(id) => self.categories.get(id).map_or(UNKNOWN, String::as_str),
        }
    }
}

/// One entry as it appears in a report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    /// Entry ID.
    pub entry_id: EntryId,
    /// Business date.
    pub date: NaiveDate,
    /// Owner.
    pub user_id: UserId,
    /// Owner display name.
    pub user_name: String,
    /// Project, for billable entries.
    pub project_id: Option<ProjectId>,
    /// Category, for internal entries.
    pub category_id: Option<CategoryId>,
    /// Project or category name.
    pub target_name: String,
    /// True for project entries.
    pub is_billable: bool,
    /// Whole hours.
    pub hours: i32,
    /// Minutes.
    pub minutes: i32,
    /// `hours + minutes / 60`.
    pub total_hours: Decimal,
    /// Notes.
    pub notes: Option<String>,
}

/// A user's share of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserShare {
    /// User.
    pub user_id: UserId,
    /// Display name.
    pub user_name: String,
    /// Minutes logged.
    pub minutes: i64,
    /// Hours logged.
    pub hours: Decimal,
}

/// A project's share of a user's time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectShare {
    /// Project.
    pub project_id: ProjectId,
    /// Project name.
    pub project_name: String,
    /// Minutes logged.
    pub minutes: i64,
    /// Hours logged.
    pub hours: Decimal,
}

/// Time per project, split by user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectBreakdown {
    /// Project.
    pub project_id: ProjectId,
    /// Project name.
    pub project_name: String,
    /// Minutes logged.
    pub minutes: i64,
    /// Hours logged.
    pub hours: Decimal,
    /// Per-user subtotals, largest first.
    pub users: Vec<UserShare>,
}

/// Time per user, split by project.
///
/// The user total includes internal (category) time; `projects` only lists
/// billable time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserBreakdown {
    /// User.
    pub user_id: UserId,
    /// Display name.
    pub user_name: String,
    /// Minutes logged.
    pub minutes: i64,
    /// Hours logged.
    pub hours: Decimal,
    /// Per-project subtotals, largest first.
    pub projects: Vec<ProjectShare>,
}

/// Report totals and breakdowns.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// All minutes.
    pub total_minutes: i64,
    /// Minutes on projects.
    pub billable_minutes: i64,
    /// Minutes on categories.
    pub internal_minutes: i64,
    /// All hours.
    pub total_hours: Decimal,
    /// Hours on projects.
    pub billable_hours: Decimal,
    /// Hours on categories.
    pub internal_hours: Decimal,
    /// Per-project breakdown, largest first.
    pub project_breakdown: Vec<ProjectBreakdown>,
    /// Per-user breakdown, largest first.
    pub user_breakdown: Vec<UserBreakdown>,
}

/// A full timesheet report.
#[derive(Debug, Clone, Serialize)]
pub struct TimesheetReport {
    /// Filters the report was built with.
    pub filters: ReportFilters,
    /// Totals and breakdowns.
    pub summary: ReportSummary,
    /// Matching entries, newest first.
    pub entries: Vec<ReportRow>,
}

/// Organisation-wide statistics for administrators.
#[derive(Debug, Clone, Serialize)]
pub struct AdminStats {
    /// Per-project breakdown over all live entries.
    pub project_breakdown: Vec<ProjectBreakdown>,
    /// Per-user breakdown over all live entries.
    pub user_breakdown: Vec<UserBreakdown>,
    /// Users on leave today.
    pub users_on_leave: Vec<UserOnLeave>,
}
