//! Favorite project repository.

use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};
use tempo_shared::AppError;
use tempo_shared::types::{ProjectId, UserId};
use uuid::Uuid;

use crate::entities::favorite_projects;

/// Error types for favorite operations.
#[derive(Debug, thiserror::Error)]
pub enum FavoriteError {
    /// Already a favorite.
    #[error("Project is already a favorite")]
    AlreadyFavorite,

    /// Not a favorite.
    #[error("Favorite not found")]
    NotFound,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<FavoriteError> for AppError {
    fn from(err: FavoriteError) -> Self {
        match err {
            FavoriteError::AlreadyFavorite => Self::Conflict(err.to_string()),
            FavoriteError::NotFound => Self::NotFound(err.to_string()),
            FavoriteError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Favorite project repository.
#[derive(Debug, Clone)]
pub struct FavoriteRepository {
    db: DatabaseConnection,
}

impl FavoriteRepository {
    /// Creates a new favorite repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Marks a project as a favorite of `user_id`.
    pub async fn add(&self, user_id: UserId, project_id: ProjectId) -> Result<(), FavoriteError> {
        let model = favorite_projects::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id.into_inner()),
            project_id: Set(project_id.into_inner()),
            created_at: Set(Utc::now().into()),
        };

        match model.insert(&self.db).await {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(FavoriteError::AlreadyFavorite)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Removes a favorite.
    pub async fn remove(&self, user_id: UserId, project_id: ProjectId) -> Result<(), FavoriteError> {
        let result = favorite_projects::Entity::delete_many()
            .filter(favorite_projects::Column::UserId.eq(user_id.into_inner()))
            .filter(favorite_projects::Column::ProjectId.eq(project_id.into_inner()))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(FavoriteError::NotFound);
        }
        Ok(())
    }

    /// IDs of the user's favorite projects.
    pub async fn project_ids(&self, user_id: UserId) -> Result<HashSet<ProjectId>, DbErr> {
        let rows = favorite_projects::Entity::find()
            .filter(favorite_projects::Column::UserId.eq(user_id.into_inner()))
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|f| ProjectId::from_uuid(f.project_id))
            .collect())
    }
}
