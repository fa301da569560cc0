//! Assignment repository for user-to-project membership.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use tempo_core::project::Assignment;
use tempo_shared::AppError;
use tempo_shared::types::{AssignmentId, ProjectId, UserId};

use super::convert::assignment_from_model;
use crate::entities::assignments;

/// Error types for assignment operations.
#[derive(Debug, thiserror::Error)]
pub enum AssignmentError {
    /// The user is already on the project.
    #[error("User is already assigned to this project")]
    AlreadyAssigned,

    /// No such assignment.
    #[error("Assignment not found")]
    NotFound,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AssignmentError> for AppError {
    fn from(err: AssignmentError) -> Self {
        match err {
            AssignmentError::AlreadyAssigned => Self::Conflict(err.to_string()),
            AssignmentError::NotFound => Self::NotFound(err.to_string()),
            AssignmentError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Assignment repository.
#[derive(Debug, Clone)]
pub struct AssignmentRepository {
    db: DatabaseConnection,
}

impl AssignmentRepository {
    /// Creates a new assignment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Assigns a user to a project.
    pub async fn assign(
        &self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> Result<Assignment, AssignmentError> {
        let model = assignments::ActiveModel {
            id: Set(AssignmentId::new().into_inner()),
            user_id: Set(user_id.into_inner()),
            project_id: Set(project_id.into_inner()),
            created_at: Set(Utc::now().into()),
        };

        match model.insert(&self.db).await {
            Ok(row) => Ok(assignment_from_model(row)),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AssignmentError::AlreadyAssigned)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Removes a user from a project.
    pub async fn unassign(
        &self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> Result<(), AssignmentError> {
        let result = assignments::Entity::delete_many()
            .filter(assignments::Column::UserId.eq(user_id.into_inner()))
            .filter(assignments::Column::ProjectId.eq(project_id.into_inner()))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AssignmentError::NotFound);
        }
        Ok(())
    }

    /// Returns true if the user is assigned to the project.
    pub async fn is_assigned(&self, user_id: UserId, project_id: ProjectId) -> Result<bool, DbErr> {
        let count = assignments::Entity::find()
            .filter(assignments::Column::UserId.eq(user_id.into_inner()))
            .filter(assignments::Column::ProjectId.eq(project_id.into_inner()))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Lists a project's assignments, oldest first.
    pub async fn list_for_project(&self, project_id: ProjectId) -> Result<Vec<Assignment>, DbErr> {
        let rows = assignments::Entity::find()
            .filter(assignments::Column::ProjectId.eq(project_id.into_inner()))
            .order_by_asc(assignments::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(assignment_from_model).collect())
    }
}
