//! Timesheet service.

use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde_json::Value;
use tempo_shared::Actor;
use tempo_shared::types::{EntryId, ProjectId, UserId};
use tracing::{debug, info};

use super::error::TimesheetError;
use super::store::{EntryChange, EntryQuery, EntryWrite, TimesheetStore};
use crate::accounting::{CounterDelta, plan_create, plan_delete, plan_restore, plan_update};
use crate::audit::{AuditAction, AuditEntity, AuditRecord, AuditSink, record_quietly};
use crate::clock::Clock;
use crate::entry::{
    CreateEntryInput, Entry, EntryDuration, EntryTarget, UpdateEntryInput, check_entry_date,
    normalize_notes, resolve_target,
};

/// Date rules applied to entry mutations.
#[derive(Debug, Clone, Copy)]
pub struct TimesheetPolicy {
    /// Oldest allowed date, in days before today.
    pub backdate_limit_days: i64,
    /// Reject dates after today.
    pub reject_future_dates: bool,
    /// Timezone that defines the business date.
    pub timezone: Tz,
}

impl Default for TimesheetPolicy {
    fn default() -> Self {
        Self {
            backdate_limit_days: 7,
            reject_future_dates: false,
            timezone: Tz::UTC,
        }
    }
}

/// Entry mutations with counter accounting.
///
/// Every mutating operation validates and authorizes first, then commits
/// the entry writes and counter deltas through the store in a single call.
pub struct TimesheetService<S> {
    store: S,
    audit: Arc<dyn AuditSink>,
    clock: Arc<dyn Clock>,
    policy: TimesheetPolicy,
}

impl<S: TimesheetStore> TimesheetService<S> {
    /// Creates a service.
    pub fn new(
        store: S,
        audit: Arc<dyn AuditSink>,
        clock: Arc<dyn Clock>,
        policy: TimesheetPolicy,
    ) -> Self {
        Self {
            store,
            audit,
            clock,
            policy,
        }
    }

    /// Business date today.
    pub fn today(&self) -> NaiveDate {
        self.clock.today(self.policy.timezone)
    }

    /// Returns a live entry visible to `actor`.
    pub async fn get(&self, actor: &Actor, id: EntryId) -> Result<Entry, TimesheetError> {
        let entry = self.find_live(id).await?;
        authorize_owner(actor, entry.owner_id)?;
        Ok(entry)
    }

    /// Lists entries. Non-admins only ever see their own.
    pub async fn list(
        &self,
        actor: &Actor,
        mut query: EntryQuery,
    ) -> Result<Vec<Entry>, TimesheetError> {
        if let (Some(start), Some(end)) = (query.start_date, query.end_date)
            && start > end
        {
            return Err(TimesheetError::InvalidRange { start, end });
        }

        if !actor.is_admin() {
            if let Some(owner) = query.owner_id {
                authorize_owner(actor, owner)?;
            }
            query.owner_id = Some(actor.user_id);
        }

        Ok(self.store.list_entries(&query).await?)
    }

    /// Creates an entry.
    pub async fn create(
        &self,
        actor: &Actor,
        input: CreateEntryInput,
    ) -> Result<Entry, TimesheetError> {
        let owner_id = input.owner_id.unwrap_or(actor.user_id);
        authorize_owner(actor, owner_id)?;

        let duration = EntryDuration::new(input.hours, input.minutes)?;
        let target = resolve_target(input.project_id, input.category_id)?;
        let notes = normalize_notes(input.notes)?;
        self.check_date(input.date)?;
        self.check_target(actor, owner_id, target).await?;

        let now = self.clock.now();
        let entry = Entry {
            id: EntryId::new(),
            owner_id,
            target,
            date: input.date,
            duration,
            notes,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };

        let deltas = plan_create(&entry);
        self.commit(vec![EntryWrite::Insert(entry.clone())], deltas)
            .await?;

        info!(
            entry_id = %entry.id,
            owner_id = %owner_id,
            date = %entry.date,
            minutes = entry.total_minutes(),
            "Entry created"
        );
        self.audit(
            AuditRecord::new(
                actor.user_id,
                AuditAction::Create,
                AuditEntity::Timesheet,
                entry.id.into_inner(),
            )
            .with_new(snapshot(&entry)),
        )
        .await;

        Ok(entry)
    }

    /// Applies a partial update to a live entry.
    pub async fn update(
        &self,
        actor: &Actor,
        id: EntryId,
        input: UpdateEntryInput,
    ) -> Result<Entry, TimesheetError> {
        let existing = self.find_live(id).await?;
        authorize_owner(actor, existing.owner_id)?;

        let target = if input.project_id.is_some() || input.category_id.is_some() {
            resolve_target(input.project_id, input.category_id)?
        } else {
            existing.target
        };
        let duration = EntryDuration::new(
            input.hours.unwrap_or(existing.duration.hours),
            input.minutes.unwrap_or(existing.duration.minutes),
        )?;
        let notes = match input.notes {
            Some(notes) => normalize_notes(Some(notes))?,
            None => existing.notes.clone(),
        };
        let date = input.date.unwrap_or(existing.date);
        if date != existing.date {
            self.check_date(date)?;
        }
        if target != existing.target {
            self.check_target(actor, existing.owner_id, target).await?;
        }

        let updated = Entry {
            target,
            date,
            duration,
            notes,
            updated_at: self.clock.now(),
            ..existing.clone()
        };

        let deltas = plan_update(&existing, &updated);
        self.commit(
            vec![EntryWrite::Update {
                previous: existing.clone(),
                next: updated.clone(),
            }],
            deltas,
        )
            .await?;

        info!(entry_id = %id, minutes = updated.total_minutes(), "Entry updated");
        self.audit(
            AuditRecord::new(
                actor.user_id,
                AuditAction::Update,
                AuditEntity::Timesheet,
                id.into_inner(),
            )
            .with_old(snapshot(&existing))
            .with_new(snapshot(&updated)),
        )
        .await;

        Ok(updated)
    }

    /// Soft-deletes a live entry.
    pub async fn delete(&self, actor: &Actor, id: EntryId) -> Result<(), TimesheetError> {
        let existing = self.find_live(id).await?;
        authorize_owner(actor, existing.owner_id)?;

        let deleted = Entry {
            is_deleted: true,
            updated_at: self.clock.now(),
            ..existing.clone()
        };

        let deltas = plan_delete(&existing);
        self.commit(
            vec![EntryWrite::Update {
                previous: existing.clone(),
                next: deleted,
            }],
            deltas,
        )
        .await?;

        info!(entry_id = %id, "Entry deleted");
        self.audit(
            AuditRecord::new(
                actor.user_id,
                AuditAction::Delete,
                AuditEntity::Timesheet,
                id.into_inner(),
            )
            .with_old(snapshot(&existing)),
        )
        .await;

        Ok(())
    }

    /// Restores a soft-deleted entry.
    pub async fn restore(&self, actor: &Actor, id: EntryId) -> Result<Entry, TimesheetError> {
        let existing = self
            .store
            .find_entry(id)
            .await?
            .ok_or(TimesheetError::EntryNotFound(id))?;
        authorize_owner(actor, existing.owner_id)?;

        if !existing.is_deleted {
            return Err(TimesheetError::NotDeleted(id));
        }
        if let Some(project_id) = existing.target.project_id() {
            self.find_usable_project(project_id).await?;
        }

        let restored = Entry {
            is_deleted: false,
            updated_at: self.clock.now(),
            ..existing.clone()
        };

        let deltas = plan_restore(&existing);
        self.commit(
            vec![EntryWrite::Update {
                previous: existing.clone(),
                next: restored.clone(),
            }],
            deltas,
        )
            .await?;

        info!(entry_id = %id, "Entry restored");
        self.audit(
            AuditRecord::new(
                actor.user_id,
                AuditAction::Restore,
                AuditEntity::Timesheet,
                id.into_inner(),
            )
            .with_new(snapshot(&restored)),
        )
        .await;

        Ok(restored)
    }

    /// Copies all live entries of `owner` on `from` to `to`.
    ///
    /// Fails if `to` already has entries or `from` has none. Notes are not
    /// copied. Either every copy is created or none is.
    pub async fn copy_day(
        &self,
        actor: &Actor,
        owner: Option<UserId>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Entry>, TimesheetError> {
        let owner_id = owner.unwrap_or(actor.user_id);
        authorize_owner(actor, owner_id)?;
        self.check_date(to)?;

        let existing = self
            .store
            .list_entries(&EntryQuery::day(owner_id, to))
            .await?;
        if !existing.is_empty() {
            return Err(TimesheetError::TargetDayNotEmpty(to));
        }

        let source = self
            .store
            .list_entries(&EntryQuery::day(owner_id, from))
            .await?;
        if source.is_empty() {
            return Err(TimesheetError::NothingToCopy(from));
        }

        let now = self.clock.now();
        let mut copies = Vec::with_capacity(source.len());
        let mut deltas = Vec::new();
        for original in &source {
            self.check_target(actor, owner_id, original.target).await?;

            let copy = Entry {
                id: EntryId::new(),
                owner_id,
                target: original.target,
                date: to,
                duration: original.duration,
                notes: None,
                is_deleted: false,
                created_at: now,
                updated_at: now,
            };
            deltas.extend(plan_create(&copy));
            copies.push(copy);
        }

        let writes = copies.iter().cloned().map(EntryWrite::Insert).collect();
        self.commit(writes, deltas).await?;

        info!(
            owner_id = %owner_id,
            from = %from,
            to = %to,
            count = copies.len(),
            "Entries copied"
        );
        for copy in &copies {
            self.audit(
                AuditRecord::new(
                    actor.user_id,
                    AuditAction::Create,
                    AuditEntity::Timesheet,
                    copy.id.into_inner(),
                )
                .with_new(snapshot(copy)),
            )
            .await;
        }

        Ok(copies)
    }

    async fn find_live(&self, id: EntryId) -> Result<Entry, TimesheetError> {
        match self.store.find_entry(id).await? {
            Some(entry) if entry.is_active() => Ok(entry),
            _ => Err(TimesheetError::EntryNotFound(id)),
        }
    }

    async fn find_usable_project(
        &self,
        project_id: ProjectId,
    ) -> Result<(), TimesheetError> {
        match self.store.find_project(project_id).await? {
            Some(project) if project.is_usable() => Ok(()),
            _ => Err(TimesheetError::ProjectNotFound(project_id)),
        }
    }

    async fn check_target(
        &self,
        actor: &Actor,
        owner_id: UserId,
        target: EntryTarget,
    ) -> Result<(), TimesheetError> {
        match target {
            EntryTarget::Project(project_id) => {
                self.find_usable_project(project_id).await?;
                if !actor.is_admin() && !self.store.is_assigned(owner_id, project_id).await? {
                    return Err(TimesheetError::NotAssigned(project_id));
                }
            }
            EntryTarget::Category(category_id) => {
                if !self.store.category_exists(category_id).await? {
                    return Err(TimesheetError::CategoryNotFound(category_id));
                }
            }
        }
        Ok(())
    }

    fn check_date(&self, date: NaiveDate) -> Result<(), TimesheetError> {
        check_entry_date(
            date,
            self.today(),
            self.policy.backdate_limit_days,
            self.policy.reject_future_dates,
        )?;
        Ok(())
    }

    async fn commit(
        &self,
        writes: Vec<EntryWrite>,
        deltas: Vec<CounterDelta>,
    ) -> Result<(), TimesheetError> {
        debug!(writes = writes.len(), deltas = ?deltas, "Committing entry change");
        self.store.commit(EntryChange { writes, deltas }).await?;
        Ok(())
    }

    async fn audit(&self, record: AuditRecord) {
        record_quietly(self.audit.as_ref(), record).await;
    }
}

fn authorize_owner(actor: &Actor, owner_id: UserId) -> Result<(), TimesheetError> {
    if actor.can_act_for(owner_id) {
        Ok(())
    } else {
        Err(TimesheetError::NotOwner)
    }
}

fn snapshot(entry: &Entry) -> Value {
    serde_json::to_value(entry).unwrap_or(Value::Null)
}

