//! Leave day repository.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use tempo_core::leave::{LeaveDay, LeaveError, LeaveQuery, LeaveType};
use tempo_shared::AppError;
use tempo_shared::types::{LeaveDayId, UserId};

use super::convert::leave_from_model;
use crate::entities::leave_days;

/// Error types for leave operations.
#[derive(Debug, thiserror::Error)]
pub enum LeaveDayError {
    /// Domain rule violation.
    #[error(transparent)]
    Leave(#[from] LeaveError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<LeaveDayError> for AppError {
    fn from(err: LeaveDayError) -> Self {
        match err {
            LeaveDayError::Leave(e) => e.into(),
            LeaveDayError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Leave day repository.
#[derive(Debug, Clone)]
pub struct LeaveRepository {
    db: DatabaseConnection,
}

impl LeaveRepository {
    /// Creates a new leave repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Marks `date` as leave for `user_id`.
    pub async fn mark(
        &self,
        user_id: UserId,
        date: NaiveDate,
        leave_type: LeaveType,
    ) -> Result<LeaveDay, LeaveDayError> {
        let model = leave_days::ActiveModel {
            id: Set(LeaveDayId::new().into_inner()),
            user_id: Set(user_id.into_inner()),
            date: Set(date),
            leave_type: Set(leave_type.as_str().to_string()),
            created_at: Set(Utc::now().into()),
        };

        match model.insert(&self.db).await {
            Ok(row) => Ok(leave_from_model(row)?),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(LeaveError::AlreadyMarked(date).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Removes the leave marker for `date`.
    pub async fn unmark(&self, user_id: UserId, date: NaiveDate) -> Result<(), LeaveDayError> {
        let result = leave_days::Entity::delete_many()
            .filter(leave_days::Column::UserId.eq(user_id.into_inner()))
            .filter(leave_days::Column::Date.eq(date))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(LeaveError::NotMarked(date).into());
        }
        Ok(())
    }

    /// Lists leave days matching `query`, by date.
    pub async fn list(&self, query: &LeaveQuery) -> Result<Vec<LeaveDay>, DbErr> {
        let mut select = leave_days::Entity::find();
        if let Some(user_id) = query.user_id {
            select = select.filter(leave_days::Column::UserId.eq(user_id.into_inner()));
        }
        if let Some(start) = query.start_date {
            select = select.filter(leave_days::Column::Date.gte(start));
        }
        if let Some(end) = query.end_date {
            select = select.filter(leave_days::Column::Date.lte(end));
        }

        select
            .order_by_asc(leave_days::Column::Date)
            .all(&self.db)
            .await?
            .into_iter()
            .map(leave_from_model)
            .collect()
    }

    /// Returns true if `user_id` is on leave on `date`.
    pub async fn is_on_leave(&self, user_id: UserId, date: NaiveDate) -> Result<bool, DbErr> {
        let count = leave_days::Entity::find()
            .filter(leave_days::Column::UserId.eq(user_id.into_inner()))
            .filter(leave_days::Column::Date.eq(date))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }
}
