//! Report aggregation service.

use std::cmp::Reverse;
use std::collections::HashMap;

use tempo_shared::types::{ProjectId, UserId, minutes_to_hours};

use super::error::ReportError;
use super::types::{
    AdminStats, NameDirectory, ProjectBreakdown, ProjectShare, ReportFilters, ReportRow,
    ReportSummary, TimesheetReport, UserBreakdown, UserShare,
};
use crate::entry::Entry;
use crate::leave::UserOnLeave;

/// Service for aggregating timesheet entries.
pub struct ReportService;

impl ReportService {
    /// Builds a report over the entries that match `filters`.
    ///
    /// Entries outside the filters, and soft-deleted entries, are ignored
    /// even if the caller passes them in.
    pub fn generate(
        filters: ReportFilters,
        entries: &[Entry],
        names: &NameDirectory,
    ) -> Result<TimesheetReport, ReportError> {
        if filters.start_date > filters.end_date {
            return Err(ReportError::InvalidDateRange {
                start: filters.start_date,
                end: filters.end_date,
            });
        }
        if filters.project_id.is_some() && filters.category_id.is_some() {
            return Err(ReportError::ConflictingFilters);
        }

        let matching: Vec<&Entry> = entries.iter().filter(|e| filters.matches(e)).collect();
        let summary = Self::summarize(&matching, names);

        let mut rows: Vec<ReportRow> = matching.iter().map(|e| Self::row(e, names)).collect();
        rows.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| a.user_name.cmp(&b.user_name))
        });

        Ok(TimesheetReport {
            filters,
            summary,
            entries: rows,
        })
    }

    /// Totals and breakdowns over live entries.
    #[must_use]
    pub fn summarize(entries: &[&Entry], names: &NameDirectory) -> ReportSummary {
        let mut billable_minutes = 0;
        let mut internal_minutes = 0;
        let mut by_project: HashMap<ProjectId, HashMap<UserId, i64>> = HashMap::new();
        let mut by_user: HashMap<UserId, (i64, HashMap<ProjectId, i64>)> = HashMap::new();

        for entry in entries.iter().filter(|e| e.is_active()) {
            let minutes = entry.total_minutes();
            let user = by_user.entry(entry.owner_id).or_default();
            user.0 += minutes;

            match entry.target.project_id() {
                Some(project_id) => {
                    billable_minutes += minutes;
                    *by_project
                        .entry(project_id)
                        .or_default()
                        .entry(entry.owner_id)
                        .or_default() += minutes;
                    *user.1.entry(project_id).or_default() += minutes;
                }
                None => internal_minutes += minutes,
            }
        }

        let mut project_breakdown: Vec<ProjectBreakdown> = by_project
            .into_iter()
            .map(|(project_id, users)| {
                let mut users: Vec<UserShare> = users
                    .into_iter()
                    .map(|(user_id, minutes)| UserShare {
                        user_id,
                        user_name: names.user(user_id).to_string(),
                        minutes,
                        hours: minutes_to_hours(minutes),
                    })
                    .collect();
                users.sort_by_key(|u| Reverse(u.minutes));

                let minutes = users.iter().map(|u| u.minutes).sum();
                ProjectBreakdown {
                    project_id,
                    project_name: names.project(project_id).to_string(),
                    minutes,
                    hours: minutes_to_hours(minutes),
                    users,
                }
            })
            .collect();
        project_breakdown.sort_by_key(|p| Reverse(p.minutes));

        let mut user_breakdown: Vec<UserBreakdown> = by_user
            .into_iter()
            .map(|(user_id, (minutes, projects))| {
                let mut projects: Vec<ProjectShare> = projects
                    .into_iter()
                    .map(|(project_id, minutes)| ProjectShare {
                        project_id,
                        project_name: names.project(project_id).to_string(),
                        minutes,
                        hours: minutes_to_hours(minutes),
                    })
                    .collect();
                projects.sort_by_key(|p| Reverse(p.minutes));

                UserBreakdown {
                    user_id,
                    user_name: names.user(user_id).to_string(),
                    minutes,
                    hours: minutes_to_hours(minutes),
                    projects,
                }
            })
            .collect();
        user_breakdown.sort_by_key(|u| Reverse(u.minutes));

        let total_minutes = billable_minutes + internal_minutes;
        ReportSummary {
            total_minutes,
            billable_minutes,
            internal_minutes,
            total_hours: minutes_to_hours(total_minutes),
            billable_hours: minutes_to_hours(billable_minutes),
            internal_hours: minutes_to_hours(internal_minutes),
            project_breakdown,
            user_breakdown,
        }
    }

    /// Minutes per project over live entries.
    ///
    /// This is what every project's stored counter must equal.
    #[must_use]
    pub fn project_minutes(entries: &[Entry]) -> HashMap<ProjectId, i64> {
        let mut totals = HashMap::new();
        for entry in entries.iter().filter(|e| e.is_active()) {
            if let Some(project_id) = entry.target.project_id() {
                *totals.entry(project_id).or_insert(0) += entry.total_minutes();
            }
        }
        totals
    }

    /// Unfiltered breakdowns plus who is on leave today.
    #[must_use]
    pub fn admin_stats(
        entries: &[Entry],
        names: &NameDirectory,
        users_on_leave: Vec<UserOnLeave>,
    ) -> AdminStats {
        let live: Vec<&Entry> = entries.iter().filter(|e| e.is_active()).collect();
        let summary = Self::summarize(&live, names);

        AdminStats {
            project_breakdown: summary.project_breakdown,
            user_breakdown: summary.user_breakdown,
            users_on_leave,
        }
    }

    fn row(entry: &Entry, names: &NameDirectory) -> ReportRow {
        ReportRow {
            entry_id: entry.id,
            date: entry.date,
            user_id: entry.owner_id,
            user_name: names.user(entry.owner_id).to_string(),
            project_id: entry.target.project_id(),
            category_id: entry.target.category_id(),
            target_name: names.target(&entry.target).to_string(),
            is_billable: entry.target.is_billable(),
            hours: entry.duration.hours,
            minutes: entry.duration.minutes,
            total_hours: minutes_to_hours(entry.total_minutes()),
            notes: entry.notes.clone(),
        }
    }
}
