//! Timesheet entry routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;
use tempo_core::entry::{CreateEntryInput, Entry, UpdateEntryInput};
use tempo_core::timesheet::EntryQuery;
use tempo_shared::AppError;
use tempo_shared::types::{CategoryId, EntryId, ProjectId, UserId};

use crate::{AppState, error::ApiResult, middleware::AuthUser};

/// Creates the entry routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/entries", get(list_entries).post(create_entry))
        .route("/entries/copy", post(copy_entries))
        .route(
            "/entries/{id}",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        .route("/entries/{id}/restore", post(restore_entry))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing entries.
#[derive(Debug, Default, Deserialize)]
pub struct ListEntriesQuery {
    /// First day (inclusive).
    pub start_date: Option<NaiveDate>,
    /// Last day (inclusive).
    pub end_date: Option<NaiveDate>,
    /// Owner; admins only, others always see their own.
    pub user_id: Option<UserId>,
    /// Project filter.
    pub project_id: Option<ProjectId>,
    /// Category filter.
    pub category_id: Option<CategoryId>,
}

/// Query parameters for copying a day.
///
/// Without dates, yesterday is copied onto today.
#[derive(Debug, Default, Deserialize)]
pub struct CopyEntriesQuery {
    /// Owner of both days; defaults to the caller.
    pub user_id: Option<UserId>,
    /// Source day.
    pub from_date: Option<NaiveDate>,
    /// Target day.
    pub to_date: Option<NaiveDate>,
}

/// Response for a copy.
#[derive(Debug, Serialize)]
pub struct CopyEntriesResponse {
    /// Number of entries created.
    pub copied: usize,
    /// The new entries.
    pub entries: Vec<Entry>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/entries` - List entries.
async fn list_entries(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListEntriesQuery>,
) -> ApiResult<Json<Vec<Entry>>> {
    let query = EntryQuery {
        owner_id: query.user_id,
        project_id: query.project_id,
        category_id: query.category_id,
        start_date: query.start_date,
        end_date: query.end_date,
        include_deleted: false,
    };

    let entries = state.timesheets().list(&auth.actor(), query).await?;
    Ok(Json(entries))
}

/// POST `/entries` - Create an entry.
async fn create_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateEntryInput>,
) -> ApiResult<impl IntoResponse> {
    let actor = auth.actor();
    let decision = state.limiter.check(&format!("entries:{}", actor.user_id))?;
    debug!(user_id = %actor.user_id, remaining = decision.remaining, "Entry create allowed");

    let entry = state.timesheets().create(&actor, payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET `/entries/{id}` - Get an entry.
async fn get_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Entry>> {
    let entry = state
        .timesheets()
        .get(&auth.actor(), EntryId::from_uuid(id))
        .await?;
    Ok(Json(entry))
}

/// PUT `/entries/{id}` - Update an entry.
async fn update_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEntryInput>,
) -> ApiResult<Json<Entry>> {
    let entry = state
        .timesheets()
        .update(&auth.actor(), EntryId::from_uuid(id), payload)
        .await?;
    Ok(Json(entry))
}

/// DELETE `/entries/{id}` - Soft-delete an entry.
async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .timesheets()
        .delete(&auth.actor(), EntryId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST `/entries/{id}/restore` - Undo a soft delete.
async fn restore_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Entry>> {
    let entry = state
        .timesheets()
        .restore(&auth.actor(), EntryId::from_uuid(id))
        .await?;
    Ok(Json(entry))
}

/// POST `/entries/copy` - Copy one day's entries onto another.
async fn copy_entries(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CopyEntriesQuery>,
) -> ApiResult<impl IntoResponse> {
    let to = query.to_date.unwrap_or_else(|| state.today());
    let from = match query.from_date {
        Some(from) => from,
        None => to
            .checked_sub_days(Days::new(1))
            .ok_or_else(|| AppError::Validation("Invalid target date".to_string()))?,
    };

    let entries = state
        .timesheets()
        .copy_day(&auth.actor(), query.user_id, from, to)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CopyEntriesResponse {
            copied: entries.len(),
            entries,
        }),
    ))
}
