//! Counter reconciliation.
//!
//! Compares each project's stored `used_minutes` with the total the
//! reporting engine recomputes from entries. Read-only: drift is reported,
//! never written back.

use rust_decimal::Decimal;
use serde::Serialize;
use tempo_shared::types::{ProjectId, minutes_to_hours};

use crate::entry::Entry;
use crate::project::Project;
use crate::reports::ReportService;

/// A project whose counter disagrees with its entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterDrift {
    /// Project.
    pub project_id: ProjectId,
    /// Project name.
    pub project_name: String,
    /// Counter value.
    pub stored_minutes: i64,
    /// Sum of live entries.
    pub computed_minutes: i64,
    /// `stored - computed`.
    pub drift_minutes: i64,
    /// Drift in hours.
    pub drift_hours: Decimal,
}

/// Reconciliation outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciliationReport {
    /// Number of projects checked.
    pub projects_checked: usize,
    /// Projects with drift.
    pub drifted: Vec<CounterDrift>,
}

impl ReconciliationReport {
    /// Returns true if every counter matches.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.drifted.is_empty()
    }
}

/// Service for checking stored counters.
pub struct ReconciliationService;

impl ReconciliationService {
    /// Checks every project in `projects` against `entries`.
    ///
    /// `entries` must hold all entries of those projects, any date, deleted
    /// or not; deleted ones are skipped.
    #[must_use]
    pub fn reconcile(projects: &[Project], entries: &[Entry]) -> ReconciliationReport {
        let computed = ReportService::project_minutes(entries);

        let mut drifted: Vec<CounterDrift> = projects
            .iter()
            .filter_map(|project| {
                let computed_minutes = computed.get(&project.id).copied().unwrap_or(0);
                let drift_minutes = project.used_minutes - computed_minutes;
                (drift_minutes != 0).then(|| CounterDrift {
                    project_id: project.id,
                    project_name: project.name.clone(),
                    stored_minutes: project.used_minutes,
                    computed_minutes,
                    drift_minutes,
                    drift_hours: minutes_to_hours(drift_minutes),
                })
            })
            .collect();
        drifted.sort_by(|a, b| b.drift_minutes.abs().cmp(&a.drift_minutes.abs()));

        if !drifted.is_empty() {
            tracing::warn!(
                drifted = drifted.len(),
                checked = projects.len(),
                "Project counters disagree with entry totals"
            );
        }

        ReconciliationReport {
            projects_checked: projects.len(),
            drifted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{EntryDuration, EntryTarget};
    use crate::project::ProjectStatus;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;
    use tempo_shared::types::{EntryId, UserId};

    fn project(used_minutes: i64) -> Project {
        let now = Utc::now();
        Project {
            id: ProjectId::new(),
            name: "Apollo".to_string(),
            color: "#6366f1".to_string(),
            status: ProjectStatus::Active,
            is_deleted: false,
            total_hours: dec!(10),
            used_minutes,
            created_at: now,
            updated_at: now,
        }
    }

    fn entry(project_id: ProjectId, hours: i32, is_deleted: bool) -> Entry {
        let now = Utc::now();
        Entry {
            id: EntryId::new(),
            owner_id: UserId::new(),
            target: EntryTarget::Project(project_id),
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            duration: EntryDuration::new(hours, 0).unwrap(),
            notes: None,
            is_deleted,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_consistent_counters() {
        let p = project(180);
        let entries = vec![entry(p.id, 1, false), entry(p.id, 2, false), entry(p.id, 5, true)];

        let report = ReconciliationService::reconcile(&[p], &entries);
        assert!(report.is_consistent());
        assert_eq!(report.projects_checked, 1);
    }

    #[test]
    fn test_reports_drift() {
        let ok = project(60);
        let drifted = project(300);
        let entries = vec![entry(ok.id, 1, false), entry(drifted.id, 2, false)];

        let report = ReconciliationService::reconcile(&[ok, drifted.clone()], &entries);
        assert_eq!(report.drifted.len(), 1);
        let drift = &report.drifted[0];
        assert_eq!(drift.project_id, drifted.id);
        assert_eq!(drift.stored_minutes, 300);
        assert_eq!(drift.computed_minutes, 120);
        assert_eq!(drift.drift_minutes, 180);
        assert_eq!(drift.drift_hours, dec!(3));
    }

    #[test]
    fn test_project_without_entries_must_be_zero() {
        let report = ReconciliationService::reconcile(&[project(0)], &[]);
        assert!(report.is_consistent());

        let report = ReconciliationService::reconcile(&[project(-15)], &[]);
        assert_eq!(report.drifted[0].drift_minutes, -15);
    }
}
