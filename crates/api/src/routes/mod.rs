//! API route definitions.

use axum::{Router, middleware};
use tempo_core::audit::{AuditRecord, record_quietly};

use crate::{AppState, middleware::auth_middleware};

pub mod admin;
pub mod categories;
pub mod dashboard;
pub mod entries;
pub mod health;
pub mod leave;
pub mod projects;
pub mod reports;
pub mod users;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(entries::routes())
        .merge(reports::routes())
        .merge(projects::routes())
        .merge(leave::routes())
        .merge(categories::routes())
        .merge(users::routes())
        .merge(dashboard::routes())
        .merge(admin::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}

/// Writes an audit record, logging and dropping any failure.
pub(crate) async fn audit(state: &AppState, record: AuditRecord) {
    record_quietly(state.audit_sink().as_ref(), record).await;
}
