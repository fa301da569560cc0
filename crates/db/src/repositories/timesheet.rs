//! Timesheet entry persistence.
//!
//! Implements [`TimesheetStore`] on Postgres. A commit runs in one
//! transaction: entry rows are written, then each counter delta is applied
//! as `used_minutes = used_minutes + delta`. Updates only touch a row
//! whose accounting columns still hold the values the change was planned
//! from; otherwise the transaction rolls back with a conflict.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IsolationLevel, QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};
use tempo_core::entry::Entry;
use tempo_core::project::Project;
use tempo_core::timesheet::{EntryChange, EntryQuery, EntryWrite, StoreError, TimesheetStore};
use tempo_shared::types::{CategoryId, EntryId, ProjectId, UserId};
use tracing::warn;
use uuid::Uuid;

use super::convert::{entry_active_model, entry_from_model, project_from_model};
use crate::entities::{assignments, categories, projects, timesheet_entries};

fn nullable_eq(column: timesheet_entries::Column, value: Option<Uuid>) -> SimpleExpr {
    match value {
        Some(id) => column.eq(id),
        None => column.is_null(),
    }
}

/// Translates a database error, surfacing constraint violations as conflicts.
pub(crate) fn store_error(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg) | SqlErr::ForeignKeyConstraintViolation(msg)) => {
            StoreError::Conflict(msg)
        }
        _ => StoreError::Backend(err.to_string()),
    }
}

/// Timesheet repository.
#[derive(Debug, Clone)]
pub struct TimesheetRepository {
    db: DatabaseConnection,
}

impl TimesheetRepository {
    /// Creates a new timesheet repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reads every project and every entry, deleted ones included, from a
    /// single repeatable-read snapshot so counters and entries line up.
    pub async fn reconciliation_snapshot(&self) -> Result<(Vec<Project>, Vec<Entry>), DbErr> {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::RepeatableRead),
                Some(AccessMode::ReadOnly),
            )
            .await?;

        let projects = projects::Entity::find()
            .order_by_asc(projects::Column::Name)
            .all(&txn)
            .await?
            .into_iter()
            .map(project_from_model)
            .collect::<Result<Vec<_>, _>>()?;
        let entries = timesheet_entries::Entity::find()
            .all(&txn)
            .await?
            .into_iter()
            .map(entry_from_model)
            .collect::<Result<Vec<_>, _>>()?;

        txn.commit().await?;
        Ok((projects, entries))
    }

    async fn query(&self, query: &EntryQuery) -> Result<Vec<Entry>, DbErr> {
        let mut select = timesheet_entries::Entity::find();

        if !query.include_deleted {
            select = select.filter(timesheet_entries::Column::IsDeleted.eq(false));
        }
        if let Some(owner_id) = query.owner_id {
            select = select.filter(timesheet_entries::Column::UserId.eq(owner_id.into_inner()));
        }
        if let Some(project_id) = query.project_id {
            select =
                select.filter(timesheet_entries::Column::ProjectId.eq(project_id.into_inner()));
        }
        if let Some(category_id) = query.category_id {
            select =
                select.filter(timesheet_entries::Column::CategoryId.eq(category_id.into_inner()));
        }
        if let Some(start) = query.start_date {
            select = select.filter(timesheet_entries::Column::Date.gte(start));
        }
        if let Some(end) = query.end_date {
            select = select.filter(timesheet_entries::Column::Date.lte(end));
        }

        select
            .order_by_desc(timesheet_entries::Column::Date)
            .order_by_asc(timesheet_entries::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(entry_from_model)
            .collect()
    }
}

#[async_trait]
impl TimesheetStore for TimesheetRepository {
    async fn find_entry(&self, id: EntryId) -> Result<Option<Entry>, StoreError> {
        timesheet_entries::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(store_error)?
            .map(entry_from_model)
            .transpose()
            .map_err(store_error)
    }

    async fn find_project(&self, id: ProjectId) -> Result<Option<Project>, StoreError> {
        projects::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(store_error)?
            .map(project_from_model)
            .transpose()
            .map_err(store_error)
    }

    async fn category_exists(&self, id: CategoryId) -> Result<bool, StoreError> {
        let found = categories::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(store_error)?;
        Ok(found.is_some())
    }

    async fn is_assigned(&self, user_id: UserId, project_id: ProjectId) -> Result<bool, StoreError> {
        let found = assignments::Entity::find()
            .filter(assignments::Column::UserId.eq(user_id.into_inner()))
            .filter(assignments::Column::ProjectId.eq(project_id.into_inner()))
            .one(&self.db)
            .await
            .map_err(store_error)?;
        Ok(found.is_some())
    }

    async fn list_entries(&self, query: &EntryQuery) -> Result<Vec<Entry>, StoreError> {
        self.query(query).await.map_err(store_error)
    }

    async fn commit(&self, change: EntryChange) -> Result<(), StoreError> {
        let txn = self.db.begin().await.map_err(store_error)?;

        for write in change.writes {
            match write {
                EntryWrite::Insert(entry) => {
                    entry_active_model(&entry)
                        .insert(&txn)
                        .await
                        .map_err(store_error)?;
                }
                EntryWrite::Update { previous, next } => {
                    let result = timesheet_entries::Entity::update_many()
                        .set(entry_active_model(&next))
                        .filter(timesheet_entries::Column::Id.eq(previous.id.into_inner()))
                        .filter(timesheet_entries::Column::IsDeleted.eq(previous.is_deleted))
                        .filter(timesheet_entries::Column::Hours.eq(previous.duration.hours))
                        .filter(timesheet_entries::Column::Minutes.eq(previous.duration.minutes))
                        .filter(nullable_eq(
                            timesheet_entries::Column::ProjectId,
                            previous.target.project_id().map(ProjectId::into_inner),
                        ))
                        .filter(nullable_eq(
                            timesheet_entries::Column::CategoryId,
                            previous.target.category_id().map(CategoryId::into_inner),
                        ))
                        .exec(&txn)
                        .await
                        .map_err(store_error)?;

                    if result.rows_affected == 0 {
                        warn!(entry_id = %previous.id, "Entry changed since it was read");
                        return Err(StoreError::Conflict(format!(
                            "entry {} changed concurrently",
                            previous.id
                        )));
                    }
                }
            }
        }

        for delta in change.deltas {
            let result = projects::Entity::update_many()
                .col_expr(
                    projects::Column::UsedMinutes,
                    Expr::col(projects::Column::UsedMinutes).add(delta.minutes),
                )
                .filter(projects::Column::Id.eq(delta.project_id.into_inner()))
                .exec(&txn)
                .await
                .map_err(store_error)?;

            if result.rows_affected == 0 {
                warn!(project_id = %delta.project_id, "Counter delta for missing project");
                return Err(StoreError::MissingCounter(delta.project_id));
            }
        }

        txn.commit().await.map_err(store_error)?;
        Ok(())
    }
}
