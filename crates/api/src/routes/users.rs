//! User directory routes.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use uuid::Uuid;
use tempo_db::UserRepository;

use crate::{AppState, error::ApiResult, middleware::AuthUser};

/// Creates the user routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users))
}

/// A user as listed to administrators.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email.
    pub email: String,
    /// Role.
    pub role: String,
    /// Whether the account is active.
    pub is_active: bool,
}

/// GET `/users` - All known users (admin only).
async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<UserResponse>>> {
    auth.require_admin()?;

    let users = UserRepository::new((*state.db).clone())
        .list()
        .await?
        .into_iter()
        .map(|u| UserResponse {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            is_active: u.is_active,
        })
        .collect();

    Ok(Json(users))
}
