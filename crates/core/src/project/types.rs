//! Project data types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tempo_shared::types::{AssignmentId, ProjectId, UserId, minutes_to_hours};

use crate::budget::{BudgetService, BudgetView};

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectStatus {
    /// Open for time logging.
    Active,
    /// Hidden from users' project lists.
    Archived,
}

impl ProjectStatus {
    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Archived => "ARCHIVED",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "ARCHIVED" => Ok(Self::Archived),
            other => Err(format!("unknown project status: {other}")),
        }
    }
}

/// A project with its hour budget and used counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project ID.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
    /// Display color (`#RRGGBB`).
    pub color: String,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// Budgeted hours; zero means unbudgeted.
    pub total_hours: Decimal,
    /// Minutes logged on live entries, maintained by counter deltas.
    pub used_minutes: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Hours logged so far.
    #[must_use]
    pub fn used_hours(&self) -> Decimal {
        minutes_to_hours(self.used_minutes)
    }

    /// Derived budget view.
    #[must_use]
    pub fn budget(&self) -> BudgetView {
        BudgetService::derive(self.total_hours, self.used_minutes)
    }

    /// Returns true if entries may be booked against the project.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.is_deleted
    }
}

/// Project as shown in lists and dashboards.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    /// Project ID.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
    /// Display color.
    pub color: String,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Derived budget figures.
    pub budget: BudgetView,
    /// Whether the viewer marked it as a favorite.
    pub is_favorite: bool,
}

impl ProjectSummary {
    /// Builds the summary for one viewer.
    #[must_use]
    pub fn new(project: &Project, is_favorite: bool) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            color: project.color.clone(),
            status: project.status,
            budget: project.budget(),
            is_favorite,
        }
    }
}

/// A user-to-project assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assignment ID.
    pub id: AssignmentId,
    /// Assigned user.
    pub user_id: UserId,
    /// Project.
    pub project_id: ProjectId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectInput {
    /// Display name.
    pub name: String,
    /// Display color; picked from the palette when omitted.
    pub color: Option<String>,
    /// Budgeted hours; defaults to 0 (unbudgeted).
    pub total_hours: Option<Decimal>,
}

/// Validated project ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    /// Trimmed name.
    pub name: String,
    /// Validated color.
    pub color: String,
    /// Budgeted hours.
    pub total_hours: Decimal,
}

/// Partial project update. `None` keeps the current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectInput {
    /// New name.
    pub name: Option<String>,
    /// New color.
    pub color: Option<String>,
    /// New budget.
    pub total_hours: Option<Decimal>,
    /// New status.
    pub status: Option<ProjectStatus>,
}
