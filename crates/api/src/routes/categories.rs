//! Category routes.

use axum::{Json, Router, extract::State, routing::get};
use tempo_db::CategoryRepository;
use tempo_db::entities::categories;

use crate::{AppState, error::ApiResult, middleware::AuthUser};

/// Creates the category routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/categories", get(list_categories))
}

/// GET `/categories` - Internal time categories.
async fn list_categories(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<categories::Model>>> {
    let rows = CategoryRepository::new((*state.db).clone()).list().await?;
    Ok(Json(rows))
}
