//! Property-based tests for counter maintenance.
//!
//! Random sequences of create/update/delete/restore are replayed through the
//! delta planner; the resulting counters must always equal the totals the
//! reporting engine recomputes from the entries themselves.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use proptest::sample::Index;
use tempo_shared::types::{CategoryId, EntryId, ProjectId, UserId};

use super::delta::{apply_deltas, plan_create, plan_delete, plan_restore, plan_update};
use crate::entry::{Entry, EntryDuration, EntryTarget};
use crate::reports::ReportService;

const PROJECTS: usize = 3;

#[derive(Debug, Clone)]
enum Op {
    Create {
        project: Option<usize>,
        hours: i32,
        minutes: i32,
    },
    Update {
        index: Index,
        project: Option<usize>,
        hours: i32,
        minutes: i32,
    },
    Delete(Index),
    Restore(Index),
}

/// `Some(i)` books on project `i`, `None` on the internal category.
fn target_strategy() -> impl Strategy<Value = Option<usize>> {
    prop_oneof![3 => (0..PROJECTS).prop_map(Some), 1 => Just(None)]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (target_strategy(), 0i32..=10, 0i32..=59)
            .prop_map(|(project, hours, minutes)| Op::Create { project, hours, minutes }),
        2 => (any::<Index>(), target_strategy(), 0i32..=10, 0i32..=59)
            .prop_map(|(index, project, hours, minutes)| Op::Update { index, project, hours, minutes }),
        1 => any::<Index>().prop_map(Op::Delete),
        1 => any::<Index>().prop_map(Op::Restore),
    ]
}

struct Ledger {
    projects: Vec<ProjectId>,
    category: CategoryId,
    entries: Vec<Entry>,
    counters: HashMap<ProjectId, i64>,
}

impl Ledger {
    fn new() -> Self {
        Self {
            projects: (0..PROJECTS).map(|_| ProjectId::new()).collect(),
            category: CategoryId::new(),
            entries: Vec::new(),
            counters: HashMap::new(),
        }
    }

    fn target(&self, project: Option<usize>) -> EntryTarget {
        project.map_or(EntryTarget::Category(self.category), |i| {
            EntryTarget::Project(self.projects[i])
        })
    }

    fn run(&mut self, op: &Op) {
        match op {
            Op::Create {
                project,
                hours,
                minutes,
            } => {
                let now = Utc::now();
                let entry = Entry {
                    id: EntryId::new(),
                    owner_id: UserId::new(),
                    target: self.target(*project),
                    date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                    duration: EntryDuration::new(*hours, *minutes).unwrap(),
                    notes: None,
                    is_deleted: false,
                    created_at: now,
                    updated_at: now,
                };
                apply_deltas(&mut self.counters, &plan_create(&entry));
                self.entries.push(entry);
            }
            Op::Update {
                index,
                project,
                hours,
                minutes,
            } => {
                if self.entries.is_empty() {
                    return;
                }
                let i = index.index(self.entries.len());
                if self.entries[i].is_deleted {
                    return;
                }
                let after = Entry {
                    target: self.target(*project),
                    duration: EntryDuration::new(*hours, *minutes).unwrap(),
                    ..self.entries[i].clone()
                };
                apply_deltas(&mut self.counters, &plan_update(&self.entries[i], &after));
                self.entries[i] = after;
            }
            Op::Delete(index) => {
                if self.entries.is_empty() {
                    return;
                }
                let i = index.index(self.entries.len());
                if self.entries[i].is_deleted {
                    return;
                }
                apply_deltas(&mut self.counters, &plan_delete(&self.entries[i]));
                self.entries[i].is_deleted = true;
            }
            Op::Restore(index) => {
                if self.entries.is_empty() {
                    return;
                }
                let i = index.index(self.entries.len());
                if !self.entries[i].is_deleted {
                    return;
                }
                apply_deltas(&mut self.counters, &plan_restore(&self.entries[i]));
                self.entries[i].is_deleted = false;
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Counter maintained by deltas == sum of live entries, per project.
    #[test]
    fn prop_counters_match_recomputed_totals(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut ledger = Ledger::new();
        for op in &ops {
            ledger.run(op);
        }

        let recomputed = ReportService::project_minutes(&ledger.entries);
        for project in &ledger.projects {
            let stored = ledger.counters.get(project).copied().unwrap_or(0);
            let expected = recomputed.get(project).copied().unwrap_or(0);
            prop_assert_eq!(stored, expected);
            prop_assert!(stored >= 0);
        }
    }

    /// Deleting every entry brings every counter back to zero.
    #[test]
    fn prop_deleted_entries_contribute_nothing(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut ledger = Ledger::new();
        for op in &ops {
            ledger.run(op);
        }
        for i in 0..ledger.entries.len() {
            if !ledger.entries[i].is_deleted {
                apply_deltas(&mut ledger.counters, &plan_delete(&ledger.entries[i]));
                ledger.entries[i].is_deleted = true;
            }
        }

        prop_assert!(ledger.counters.values().all(|minutes| *minutes == 0));
        prop_assert!(ReportService::project_minutes(&ledger.entries).is_empty());
    }

    /// Moving an entry between projects never changes the sum of counters.
    #[test]
    fn prop_reassignment_preserves_total(hours in 0i32..=24, minutes in 0i32..=52, from in 0..PROJECTS, to in 0..PROJECTS) {
        let mut ledger = Ledger::new();
        ledger.run(&Op::Create { project: Some(from), hours, minutes });
        let before: i64 = ledger.counters.values().sum();

        let entry = ledger.entries[0].clone();
        let moved = Entry { target: EntryTarget::Project(ledger.projects[to]), ..entry.clone() };
        let deltas = plan_update(&entry, &moved);
        apply_deltas(&mut ledger.counters, &deltas);

        prop_assert_eq!(ledger.counters.values().sum::<i64>(), before);
        prop_assert_eq!(
            ledger.counters.get(&ledger.projects[to]).copied().unwrap_or(0),
            entry.total_minutes()
        );
    }
}
