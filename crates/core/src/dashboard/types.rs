//! Dashboard data types.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;
use tempo_shared::types::ProjectId;

use crate::entry::Entry;
use crate::project::{Project, ProjectSummary};

/// Everything the dashboard is built from.
#[derive(Debug, Clone)]
pub struct DashboardInput {
    /// Business date.
    pub today: NaiveDate,
    /// Expected hours per working day.
    pub workday_hours: u32,
    /// The user's live entries from the start of the week through today.
    pub week_entries: Vec<Entry>,
    /// Whether today is a leave day for the user.
    pub is_leave_today: bool,
    /// Projects the user is assigned to.
    pub assigned_projects: Vec<Project>,
    /// The user's favorite projects.
    pub favorites: HashSet<ProjectId>,
}

/// Today's progress.
#[derive(Debug, Clone, Serialize)]
pub struct TodaySummary {
    /// Business date.
    pub date: NaiveDate,
    /// Today's entries, newest first.
    pub entries: Vec<Entry>,
    /// Minutes logged today.
    pub total_minutes: i64,
    /// Workday target in minutes.
    pub target_minutes: i64,
    /// Target reached.
    pub is_complete: bool,
    /// Today is a leave day.
    pub is_leave: bool,
}

/// This week's progress (Monday start).
#[derive(Debug, Clone, Serialize)]
pub struct WeekSummary {
    /// Monday of the current week.
    pub start_date: NaiveDate,
    /// Minutes logged this week.
    pub total_minutes: i64,
    /// Five workdays' target in minutes.
    pub target_minutes: i64,
    /// Minutes per day that has entries.
    pub daily_minutes: BTreeMap<NaiveDate, i64>,
}

/// Dashboard for one user.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    /// Today.
    pub today: TodaySummary,
    /// This week.
    pub week: WeekSummary,
    /// Assigned active projects with their budget view.
    pub projects: Vec<ProjectSummary>,
    /// Expected hours per working day.
    pub target_hours_per_day: u32,
}
