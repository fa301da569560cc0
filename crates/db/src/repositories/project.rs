//! Project repository for database operations.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use tempo_core::project::{NewProject, Project, ProjectStatus};
use tempo_shared::types::{ProjectId, UserId};

use super::convert::project_from_model;
use crate::entities::{assignments, projects};

/// Project repository.
///
/// The `used_minutes` counter is only ever written by
/// [`TimesheetRepository`](super::TimesheetRepository) commits.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    db: DatabaseConnection,
}

impl ProjectRepository {
    /// Creates a new project repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Number of projects ever created, deleted included.
    pub async fn count(&self) -> Result<u64, DbErr> {
        projects::Entity::find().count(&self.db).await
    }

    /// Inserts a validated project with an empty counter.
    pub async fn create(&self, input: NewProject) -> Result<Project, DbErr> {
        let now = Utc::now();
        let model = projects::ActiveModel {
            id: Set(ProjectId::new().into_inner()),
            name: Set(input.name),
            color: Set(input.color),
            status: Set(ProjectStatus::Active.as_str().to_string()),
            is_deleted: Set(false),
            total_hours: Set(input.total_hours),
            used_minutes: Set(0),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        project_from_model(model.insert(&self.db).await?)
    }

    /// Finds a project by ID, deleted or not.
    pub async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, DbErr> {
        projects::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(project_from_model)
            .transpose()
    }

    /// Writes the editable fields of `project`. The counter is left untouched.
    pub async fn update(&self, project: &Project) -> Result<Project, DbErr> {
        let model = projects::ActiveModel {
            id: Set(project.id.into_inner()),
            name: Set(project.name.clone()),
            color: Set(project.color.clone()),
            status: Set(project.status.as_str().to_string()),
            total_hours: Set(project.total_hours),
            updated_at: Set(project.updated_at.into()),
            ..Default::default()
        };

        project_from_model(model.update(&self.db).await?)
    }

    /// Soft-deletes a project. Returns false if it was already gone.
    pub async fn soft_delete(&self, id: ProjectId) -> Result<bool, DbErr> {
        let result = projects::Entity::update_many()
            .col_expr(projects::Column::IsDeleted, sea_orm::sea_query::Expr::value(true))
            .col_expr(
                projects::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .filter(projects::Column::Id.eq(id.into_inner()))
            .filter(projects::Column::IsDeleted.eq(false))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Lists live projects, optionally including archived ones.
    pub async fn list(&self, include_archived: bool) -> Result<Vec<Project>, DbErr> {
        let mut query = projects::Entity::find().filter(projects::Column::IsDeleted.eq(false));
        if !include_archived {
            query = query.filter(projects::Column::Status.eq(ProjectStatus::Active.as_str()));
        }

        query
            .order_by_asc(projects::Column::Name)
            .all(&self.db)
            .await?
            .into_iter()
            .map(project_from_model)
            .collect()
    }

    /// Lists live ACTIVE projects `user_id` is assigned to.
    pub async fn list_assigned(&self, user_id: UserId) -> Result<Vec<Project>, DbErr> {
        projects::Entity::find()
            .join(JoinType::InnerJoin, projects::Relation::Assignments.def())
            .filter(assignments::Column::UserId.eq(user_id.into_inner()))
            .filter(projects::Column::IsDeleted.eq(false))
            .filter(projects::Column::Status.eq(ProjectStatus::Active.as_str()))
            .order_by_asc(projects::Column::Name)
            .all(&self.db)
            .await?
            .into_iter()
            .map(project_from_model)
            .collect()
    }

    /// Project names by ID, deleted projects included.
    pub async fn names(&self) -> Result<HashMap<ProjectId, String>, DbErr> {
        let rows = projects::Entity::find().all(&self.db).await?;
        Ok(rows
            .into_iter()
            .map(|p| (ProjectId::from_uuid(p.id), p.name))
            .collect())
    }
}
