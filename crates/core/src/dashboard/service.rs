//! Dashboard assembly.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use tempo_shared::types::MINUTES_PER_HOUR;

use super::types::{Dashboard, DashboardInput, TodaySummary, WeekSummary};
use crate::entry::Entry;
use crate::project::{ProjectService, ProjectStatus, ProjectSummary};

/// Working days counted toward the weekly target.
const WORKDAYS_PER_WEEK: i64 = 5;

/// Service for building dashboards.
pub struct DashboardService;

impl DashboardService {
    /// Monday of the week containing `date`.
    #[must_use]
    pub fn week_start(date: NaiveDate) -> NaiveDate {
        date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
    }

    /// Builds the dashboard.
    #[must_use]
    pub fn build(input: DashboardInput) -> Dashboard {
        let week_start = Self::week_start(input.today);
        let daily_target = i64::from(input.workday_hours) * MINUTES_PER_HOUR;

        let week_entries: Vec<Entry> = input
            .week_entries
            .into_iter()
            .filter(|e| e.is_active() && e.date >= week_start && e.date <= input.today)
            .collect();

        let mut daily_minutes: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        for entry in &week_entries {
            *daily_minutes.entry(entry.date).or_insert(0) += entry.total_minutes();
        }

        let mut today_entries: Vec<Entry> = week_entries
            .into_iter()
            .filter(|e| e.date == input.today)
            .collect();
        today_entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let today_minutes: i64 = today_entries.iter().map(Entry::total_minutes).sum();

        let mut projects: Vec<ProjectSummary> = input
            .assigned_projects
            .iter()
            .filter(|p| p.is_usable() && p.status == ProjectStatus::Active)
            .map(|p| ProjectSummary::new(p, input.favorites.contains(&p.id)))
            .collect();
        ProjectService::sort_for_listing(&mut projects);

        Dashboard {
            today: TodaySummary {
                date: input.today,
                entries: today_entries,
                total_minutes: today_minutes,
                target_minutes: daily_target,
                is_complete: today_minutes >= daily_target,
                is_leave: input.is_leave_today,
            },
            week: WeekSummary {
                start_date: week_start,
                total_minutes: daily_minutes.values().sum(),
                target_minutes: daily_target * WORKDAYS_PER_WEEK,
                daily_minutes,
            },
            projects,
            target_hours_per_day: input.workday_hours,
        }
    }
}
