//! Leave calendar routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use tempo_core::audit::{AuditAction, AuditEntity, AuditRecord};
use tempo_core::leave::{LeaveDay, LeaveQuery, LeaveService, MarkLeaveInput};
use tempo_db::LeaveRepository;
use tempo_shared::types::UserId;

use crate::{AppState, error::ApiResult, middleware::AuthUser, routes::audit};

/// Creates the leave routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leave", get(list_leave).post(mark_leave))
        .route("/leave/{date}", delete(unmark_leave))
}

/// Query parameters for removing a leave day.
#[derive(Debug, Default, Deserialize)]
pub struct UnmarkLeaveQuery {
    /// User; defaults to the caller.
    pub user_id: Option<UserId>,
}

/// GET `/leave` - List leave days in a range.
async fn list_leave(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<LeaveQuery>,
) -> ApiResult<Json<Vec<LeaveDay>>> {
    let query = LeaveService::scope_query(&auth.actor(), query)?;
    let days = LeaveRepository::new((*state.db).clone()).list(&query).await?;
    Ok(Json(days))
}

/// POST `/leave` - Mark a day as leave.
async fn mark_leave(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<MarkLeaveInput>,
) -> ApiResult<impl IntoResponse> {
    let actor = auth.actor();
    let user_id = LeaveService::resolve_owner(&actor, payload.user_id)?;

    let day = LeaveRepository::new((*state.db).clone())
        .mark(user_id, payload.date, payload.leave_type.unwrap_or_default())
        .await?;

    info!(user_id = %user_id, date = %day.date, leave_type = day.leave_type.as_str(), "Leave marked");
    audit(
        &state,
        AuditRecord::new(
            actor.user_id,
            AuditAction::Create,
            AuditEntity::LeaveDay,
            day.id.into_inner(),
        )
        .with_new(json!({ "user_id": user_id, "date": day.date, "type": day.leave_type })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(day)))
}

/// DELETE `/leave/{date}` - Remove a leave day.
async fn unmark_leave(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<NaiveDate>,
    Query(query): Query<UnmarkLeaveQuery>,
) -> ApiResult<StatusCode> {
    let actor = auth.actor();
    let user_id = LeaveService::resolve_owner(&actor, query.user_id)?;

    LeaveRepository::new((*state.db).clone())
        .unmark(user_id, date)
        .await?;

    info!(user_id = %user_id, date = %date, "Leave removed");
    audit(
        &state,
        AuditRecord::new(
            actor.user_id,
            AuditAction::Delete,
            AuditEntity::LeaveDay,
            user_id.into_inner(),
        )
        .with_old(json!({ "user_id": user_id, "date": date })),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
