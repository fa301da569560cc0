//! Report routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;
use tempo_core::reports::{NameDirectory, ReportFilters, ReportService, export_filename, render_csv};
use tempo_core::timesheet::{EntryQuery, TimesheetError, TimesheetStore};
use tempo_db::{CategoryRepository, ProjectRepository, TimesheetRepository, UserRepository};
use tempo_shared::types::{CategoryId, ProjectId, UserId};

use crate::{AppState, error::ApiResult, middleware::AuthUser};

/// Creates the report routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports", get(get_report))
}

/// Query parameters for a report.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// First day (inclusive).
    pub start_date: NaiveDate,
    /// Last day (inclusive).
    pub end_date: NaiveDate,
    /// Only this user's entries.
    pub user_id: Option<UserId>,
    /// Only this project's entries.
    pub project_id: Option<ProjectId>,
    /// Only this category's entries.
    pub category_id: Option<CategoryId>,
    /// `csv` to download instead of JSON.
    pub export: Option<String>,
}

/// Loads display names for users, projects and categories.
pub(crate) async fn load_names(state: &AppState) -> ApiResult<NameDirectory> {
    let db = (*state.db).clone();
    Ok(NameDirectory {
        users: UserRepository::new(db.clone()).names().await?,
        projects: ProjectRepository::new(db.clone()).names().await?,
        categories: CategoryRepository::new(db).names().await?,
    })
}

/// GET `/reports` - Aggregate entries over a date range (admin only).
async fn get_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Response> {
    let actor = auth.require_admin()?;

    let filters = ReportFilters {
        start_date: query.start_date,
        end_date: query.end_date,
        user_id: query.user_id,
        project_id: query.project_id,
        category_id: query.category_id,
    };
    let entry_query = EntryQuery {
        owner_id: filters.user_id,
        project_id: filters.project_id,
        category_id: filters.category_id,
        start_date: Some(filters.start_date),
        end_date: Some(filters.end_date),
        include_deleted: false,
    };

    let entries = TimesheetRepository::new((*state.db).clone())
        .list_entries(&entry_query)
        .await
        .map_err(TimesheetError::from)?;
    let names = load_names(&state).await?;
    let report = ReportService::generate(filters, &entries, &names)?;

    info!(
        user_id = %actor.user_id,
        entries = report.entries.len(),
        total_minutes = report.summary.total_minutes,
        "Report generated"
    );

    if query.export.as_deref() == Some("csv") {
        let body = render_csv(&report.entries)?;
        let headers = [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export_filename(state.today())),
            ),
        ];
        return Ok((headers, body).into_response());
    }

    Ok(Json(report).into_response())
}
