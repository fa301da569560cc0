//! Project, assignment and favorite routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;
use tempo_core::audit::{AuditAction, AuditEntity, AuditRecord};
use tempo_core::project::{
    Assignment, CreateProjectInput, Project, ProjectError, ProjectService, ProjectSummary,
    UpdateProjectInput,
};
use tempo_db::{AssignmentRepository, FavoriteRepository, ProjectRepository};
use tempo_shared::Actor;
use tempo_shared::types::{ProjectId, UserId};

use crate::{AppState, error::ApiResult, middleware::AuthUser, routes::audit};

/// Creates the project routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list_projects).post(create_project))
        .route(
            "/projects/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route(
            "/projects/{id}/assignments",
            get(list_assignments).post(assign_user),
        )
        .route(
            "/projects/{id}/assignments/{user_id}",
            delete(unassign_user),
        )
        .route(
            "/projects/{id}/favorite",
            post(add_favorite).delete(remove_favorite),
        )
        .route("/favorites", get(list_favorites))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing projects.
#[derive(Debug, Default, Deserialize)]
pub struct ListProjectsQuery {
    /// Include archived projects (admins only).
    #[serde(default)]
    pub include_archived: bool,
}

/// Request body for assigning a user.
#[derive(Debug, Deserialize)]
pub struct AssignUserRequest {
    /// User to assign.
    pub user_id: UserId,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Loads a live project or fails with 404.
async fn find_live_project(repo: &ProjectRepository, id: ProjectId) -> ApiResult<Project> {
    match repo.find_by_id(id).await? {
        Some(project) if !project.is_deleted => Ok(project),
        _ => Err(ProjectError::NotFound(id).into()),
    }
}

/// Loads a project the actor is allowed to see.
async fn find_visible_project(
    state: &AppState,
    actor: &Actor,
    id: ProjectId,
) -> ApiResult<Project> {
    let project = find_live_project(&ProjectRepository::new((*state.db).clone()), id).await?;
    let is_assigned = if actor.is_admin() {
        true
    } else {
        AssignmentRepository::new((*state.db).clone())
            .is_assigned(actor.user_id, id)
            .await?
    };
    ProjectService::ensure_visible(actor, &project, is_assigned)?;
    Ok(project)
}

/// Builds listing summaries for `projects`, favorites first.
async fn summarize(
    state: &AppState,
    actor: &Actor,
    projects: &[Project],
) -> ApiResult<Vec<ProjectSummary>> {
    let favorites = FavoriteRepository::new((*state.db).clone())
        .project_ids(actor.user_id)
        .await?;
    let mut summaries: Vec<ProjectSummary> = projects
        .iter()
        .map(|p| ProjectSummary::new(p, favorites.contains(&p.id)))
        .collect();
    ProjectService::sort_for_listing(&mut summaries);
    Ok(summaries)
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/projects` - Admins see every project, users their assigned active ones.
async fn list_projects(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListProjectsQuery>,
) -> ApiResult<Json<Vec<ProjectSummary>>> {
    let actor = auth.actor();
    let repo = ProjectRepository::new((*state.db).clone());

    let projects = if actor.is_admin() {
        repo.list(query.include_archived).await?
    } else {
        repo.list_assigned(actor.user_id).await?
    };

    Ok(Json(summarize(&state, &actor, &projects).await?))
}

/// POST `/projects` - Create a project (admin only).
async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateProjectInput>,
) -> ApiResult<impl IntoResponse> {
    let actor = auth.require_admin()?;
    let repo = ProjectRepository::new((*state.db).clone());

    let palette_seed = usize::try_from(repo.count().await?).unwrap_or_default();
    let input = ProjectService::validate_create(payload, palette_seed)?;
    let project = repo.create(input).await?;

    info!(project_id = %project.id, name = %project.name, "Project created");
    audit(
        &state,
        AuditRecord::new(
            actor.user_id,
            AuditAction::Create,
            AuditEntity::Project,
            project.id.into_inner(),
        )
        .with_new(json!({ "name": project.name, "total_hours": project.total_hours })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(ProjectSummary::new(&project, false))))
}

/// GET `/projects/{id}` - Get a project with its budget view.
async fn get_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ProjectSummary>> {
    let actor = auth.actor();
    let project = find_visible_project(&state, &actor, ProjectId::from_uuid(id)).await?;
    let is_favorite = FavoriteRepository::new((*state.db).clone())
        .project_ids(actor.user_id)
        .await?
        .contains(&project.id);

    Ok(Json(ProjectSummary::new(&project, is_favorite)))
}

/// PUT `/projects/{id}` - Update name, color, budget or status (admin only).
async fn update_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProjectInput>,
) -> ApiResult<Json<ProjectSummary>> {
    let actor = auth.require_admin()?;
    let repo = ProjectRepository::new((*state.db).clone());
    let existing = find_live_project(&repo, ProjectId::from_uuid(id)).await?;

    let plan = ProjectService::plan_update(actor.user_id, &existing, payload, state.clock.now())?;
    let project = repo.update(&plan.project).await?;

    info!(project_id = %project.id, changes = plan.audit.len(), "Project updated");
    for record in plan.audit {
        audit(&state, record).await;
    }

    Ok(Json(ProjectSummary::new(&project, false)))
}

/// DELETE `/projects/{id}` - Soft-delete a project (admin only).
async fn delete_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let actor = auth.require_admin()?;
    let repo = ProjectRepository::new((*state.db).clone());
    let project = find_live_project(&repo, ProjectId::from_uuid(id)).await?;

    if !repo.soft_delete(project.id).await? {
        return Err(ProjectError::NotFound(project.id).into());
    }

    info!(project_id = %project.id, "Project deleted");
    audit(&state, ProjectService::delete_record(actor.user_id, &project)).await;

    Ok(StatusCode::NO_CONTENT)
}

/// GET `/projects/{id}/assignments` - List assigned users (admin only).
async fn list_assignments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<Assignment>>> {
    auth.require_admin()?;
    let project_id = ProjectId::from_uuid(id);
    find_live_project(&ProjectRepository::new((*state.db).clone()), project_id).await?;

    let assignments = AssignmentRepository::new((*state.db).clone())
        .list_for_project(project_id)
        .await?;
    Ok(Json(assignments))
}

/// POST `/projects/{id}/assignments` - Assign a user (admin only).
async fn assign_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignUserRequest>,
) -> ApiResult<impl IntoResponse> {
    let actor = auth.require_admin()?;
    let project_id = ProjectId::from_uuid(id);
    find_live_project(&ProjectRepository::new((*state.db).clone()), project_id).await?;

    let assignment = AssignmentRepository::new((*state.db).clone())
        .assign(payload.user_id, project_id)
        .await?;

    info!(project_id = %project_id, user_id = %payload.user_id, "User assigned");
    audit(
        &state,
        AuditRecord::new(
            actor.user_id,
            AuditAction::Assign,
            AuditEntity::Assignment,
            assignment.id.into_inner(),
        )
        .with_new(json!({ "user_id": payload.user_id, "project_id": project_id })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(assignment)))
}

/// DELETE `/projects/{id}/assignments/{user_id}` - Remove a user (admin only).
async fn unassign_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    let actor = auth.require_admin()?;
    let project_id = ProjectId::from_uuid(id);
    let user_id = UserId::from_uuid(user_id);

    AssignmentRepository::new((*state.db).clone())
        .unassign(user_id, project_id)
        .await?;

    info!(project_id = %project_id, user_id = %user_id, "User unassigned");
    audit(
        &state,
        AuditRecord::new(
            actor.user_id,
            AuditAction::Unassign,
            AuditEntity::Assignment,
            project_id.into_inner(),
        )
        .with_old(json!({ "user_id": user_id, "project_id": project_id })),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST `/projects/{id}/favorite` - Mark a visible project as favorite.
async fn add_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let actor = auth.actor();
    let project = find_visible_project(&state, &actor, ProjectId::from_uuid(id)).await?;

    FavoriteRepository::new((*state.db).clone())
        .add(actor.user_id, project.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE `/projects/{id}/favorite` - Unmark a favorite.
async fn remove_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    FavoriteRepository::new((*state.db).clone())
        .remove(auth.actor().user_id, ProjectId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET `/favorites` - The caller's favorite projects.
async fn list_favorites(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ProjectSummary>>> {
    let actor = auth.actor();
    let favorites = FavoriteRepository::new((*state.db).clone())
        .project_ids(actor.user_id)
        .await?;

    let projects: Vec<Project> = ProjectRepository::new((*state.db).clone())
        .list(true)
        .await?
        .into_iter()
        .filter(|p| favorites.contains(&p.id))
        .collect();

    Ok(Json(summarize(&state, &actor, &projects).await?))
}
