//! Category repository. Categories are reference data.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};
use tempo_shared::types::CategoryId;

use crate::entities::categories;

/// Category repository.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all categories by name.
    pub async fn list(&self) -> Result<Vec<categories::Model>, DbErr> {
        categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
    }

    /// Category names by ID.
    pub async fn names(&self) -> Result<HashMap<CategoryId, String>, DbErr> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .map(|c| (CategoryId::from_uuid(c.id), c.name))
            .collect())
    }

    /// Inserts a category unless one with the same name exists.
    pub async fn ensure(&self, name: &str, color: &str, is_system: bool) -> Result<(), DbErr> {
        let model = categories::ActiveModel {
            id: Set(CategoryId::new().into_inner()),
            name: Set(name.to_string()),
            color: Set(color.to_string()),
            is_system: Set(is_system),
            created_at: Set(Utc::now().into()),
        };

        categories::Entity::insert(model)
            .on_conflict(
                OnConflict::column(categories::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
