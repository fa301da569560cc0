//! In-memory store and audit sinks for service tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tempo_shared::types::{CategoryId, EntryId, ProjectId, UserId};

use super::store::{
    EntryChange, EntryQuery, EntryWrite, StoreError, TimesheetStore, accounting_matches,
};
use crate::audit::{AuditError, AuditRecord, AuditSink};
use crate::entry::Entry;
use crate::project::Project;

#[derive(Debug, Default)]
struct Tables {
    entries: HashMap<EntryId, Entry>,
    projects: HashMap<ProjectId, Project>,
    categories: HashSet<CategoryId>,
    assignments: HashSet<(UserId, ProjectId)>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_commit: AtomicBool,
}

impl MemoryStore {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }

    pub fn add_project(&self, project: Project) {
        self.tables().projects.insert(project.id, project);
    }

    pub fn add_category(&self, id: CategoryId) {
        self.tables().categories.insert(id);
    }

    pub fn assign(&self, user_id: UserId, project_id: ProjectId) {
        self.tables().assignments.insert((user_id, project_id));
    }

    pub fn soft_delete_project(&self, id: ProjectId) {
        if let Some(project) = self.tables().projects.get_mut(&id) {
            project.is_deleted = true;
        }
    }

    pub fn fail_commits(&self, fail: bool) {
        self.fail_commit.store(fail, Ordering::SeqCst);
    }

    pub fn used_minutes(&self, id: ProjectId) -> i64 {
        self.tables().projects[&id].used_minutes
    }

    pub fn projects(&self) -> Vec<Project> {
        self.tables().projects.values().cloned().collect()
    }

    pub fn all_entries(&self) -> Vec<Entry> {
        self.tables().entries.values().cloned().collect()
    }
}

#[async_trait]
impl TimesheetStore for &MemoryStore {
    async fn find_entry(&self, id: EntryId) -> Result<Option<Entry>, StoreError> {
        Ok(self.tables().entries.get(&id).cloned())
    }

    async fn find_project(&self, id: ProjectId) -> Result<Option<Project>, StoreError> {
        Ok(self.tables().projects.get(&id).cloned())
    }

    async fn category_exists(&self, id: CategoryId) -> Result<bool, StoreError> {
        Ok(self.tables().categories.contains(&id))
    }

    async fn is_assigned(&self, user_id: UserId, project_id: ProjectId) -> Result<bool, StoreError> {
        Ok(self.tables().assignments.contains(&(user_id, project_id)))
    }

    async fn list_entries(&self, query: &EntryQuery) -> Result<Vec<Entry>, StoreError> {
        let mut entries: Vec<Entry> = self
            .tables()
            .entries
            .values()
            .filter(|e| query.matches(e))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date).then(a.created_at.cmp(&b.created_at)));
        Ok(entries)
    }

    async fn commit(&self, change: EntryChange) -> Result<(), StoreError> {
        if self.fail_commit.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected failure".into()));
        }

        let mut tables = self.tables();
        for delta in &change.deltas {
            if !tables.projects.contains_key(&delta.project_id) {
                return Err(StoreError::MissingCounter(delta.project_id));
            }
        }
        for write in &change.writes {
            match write {
                EntryWrite::Insert(entry) if tables.entries.contains_key(&entry.id) => {
                    return Err(StoreError::Conflict(format!("duplicate entry {}", entry.id)));
                }
                EntryWrite::Insert(_) => {}
                EntryWrite::Update { previous, .. } => {
                    let current = tables.entries.get(&previous.id);
                    if !current.is_some_and(|stored| accounting_matches(stored, previous)) {
                        return Err(StoreError::Conflict(format!(
                            "entry {} changed concurrently",
                            previous.id
                        )));
                    }
                }
            }
        }

        for write in change.writes {
            let entry = write.entry().clone();
            tables.entries.insert(entry.id, entry);
        }
        for delta in change.deltas {
            if let Some(project) = tables.projects.get_mut(&delta.project_id) {
                project.used_minutes += delta.minutes;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl RecordingAuditSink {
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditSink for RecordingAuditSink {
    async fn record(&self, record: AuditRecord) -> Result<(), AuditError> {
        self.records.lock().unwrap().push(record);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FailingAuditSink;

#[async_trait]
impl AuditSink for FailingAuditSink {
    async fn record(&self, _record: AuditRecord) -> Result<(), AuditError> {
        Err(AuditError("sink offline".into()))
    }
}
