//! Signed counter deltas per entry transition.

use std::collections::HashMap;

use serde::Serialize;
use tempo_shared::types::ProjectId;

use crate::entry::Entry;

/// A signed change to one project's used-minutes counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CounterDelta {
    /// Project whose counter changes.
    pub project_id: ProjectId,
    /// Signed change in minutes.
    pub minutes: i64,
}

impl CounterDelta {
    /// Creates a delta.
    #[must_use]
    pub const fn new(project_id: ProjectId, minutes: i64) -> Self {
        Self {
            project_id,
            minutes,
        }
    }
}

/// What an entry currently adds to a project counter.
///
/// Category entries and soft-deleted entries contribute nothing.
#[must_use]
pub fn contribution(entry: &Entry) -> Option<(ProjectId, i64)> {
    if entry.is_deleted {
        return None;
    }
    entry
        .target
        .project_id()
        .map(|project_id| (project_id, entry.total_minutes()))
}

/// Deltas that move the counters from `before` to `after`.
///
/// On the same project the change is netted into one delta and dropped
/// when zero. Across projects the old project is debited and the new one
/// credited as two separate deltas.
#[must_use]
pub fn plan_transition(before: Option<&Entry>, after: Option<&Entry>) -> Vec<CounterDelta> {
    let old = before.and_then(contribution);
    let new = after.and_then(contribution);

    match (old, new) {
        (Some((old_project, old_minutes)), Some((new_project, new_minutes)))
            if old_project == new_project =>
        {
            let diff = new_minutes - old_minutes;
            if diff == 0 {
                Vec::new()
            } else {
                vec![CounterDelta::new(old_project, diff)]
            }
        }
        (old, new) => old
            .map(|(project, minutes)| CounterDelta::new(project, -minutes))
            .into_iter()
            .chain(new.map(|(project, minutes)| CounterDelta::new(project, minutes)))
            .collect(),
    }
}

/// Deltas for a newly created entry.
#[must_use]
pub fn plan_create(entry: &Entry) -> Vec<CounterDelta> {
    plan_transition(None, Some(entry))
}

/// Deltas for an edit of a live entry.
#[must_use]
pub fn plan_update(before: &Entry, after: &Entry) -> Vec<CounterDelta> {
    plan_transition(Some(before), Some(after))
}

/// Deltas for soft-deleting `entry`.
#[must_use]
pub fn plan_delete(entry: &Entry) -> Vec<CounterDelta> {
    plan_transition(Some(entry), None)
}

/// Deltas for restoring a soft-deleted `entry`.
#[must_use]
pub fn plan_restore(entry: &Entry) -> Vec<CounterDelta> {
    let restored = Entry {
        is_deleted: false,
        ..entry.clone()
    };
    plan_transition(None, Some(&restored))
}

/// Applies deltas to an in-memory counter map.
pub fn apply_deltas(counters: &mut HashMap<ProjectId, i64>, deltas: &[CounterDelta]) {
    for delta in deltas {
        *counters.entry(delta.project_id).or_insert(0) += delta.minutes;
    }
}
