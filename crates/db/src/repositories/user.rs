//! User repository for database operations.
//!
//! Users are a read model for display names; identity itself comes from
//! the bearer token.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use tempo_shared::Role;
use tempo_shared::types::UserId;

use crate::entities::users;

/// User repository.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by ID.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id.into_inner()).one(&self.db).await
    }

    /// Finds a user by email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Creates a user, or refreshes name and role if the email exists.
    pub async fn upsert(&self, name: &str, email: &str, role: Role) -> Result<users::Model, DbErr> {
        let now = Utc::now();
        let model = users::ActiveModel {
            id: Set(UserId::new().into_inner()),
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            role: Set(role.as_str().to_string()),
            is_active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        users::Entity::insert(model)
            .on_conflict(
                OnConflict::column(users::Column::Email)
                    .update_columns([users::Column::Name, users::Column::Role, users::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
    }

    /// All users, ordered by name.
    pub async fn list(&self) -> Result<Vec<users::Model>, DbErr> {
        users::Entity::find()
            .order_by_asc(users::Column::Name)
            .all(&self.db)
            .await
    }

    /// Display names by user ID.
    pub async fn names(&self) -> Result<HashMap<UserId, String>, DbErr> {
        let rows = users::Entity::find().all(&self.db).await?;
        Ok(rows
            .into_iter()
            .map(|u| (UserId::from_uuid(u.id), u.name))
            .collect())
    }
}
