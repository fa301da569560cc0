//! Dashboard route.

use axum::{Json, Router, extract::State, routing::get};
use tempo_core::dashboard::{Dashboard, DashboardInput, DashboardService};
use tempo_core::timesheet::{EntryQuery, TimesheetError, TimesheetStore};
use tempo_db::{FavoriteRepository, LeaveRepository, ProjectRepository, TimesheetRepository};

use crate::{AppState, error::ApiResult, middleware::AuthUser};

/// Creates the dashboard routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

/// GET `/dashboard` - The caller's progress today and this week.
async fn get_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Dashboard>> {
    let actor = auth.actor();
    let db = (*state.db).clone();
    let today = state.today();

    let week_entries = TimesheetRepository::new(db.clone())
        .list_entries(&EntryQuery {
            owner_id: Some(actor.user_id),
            start_date: Some(DashboardService::week_start(today)),
            end_date: Some(today),
            ..EntryQuery::default()
        })
        .await
        .map_err(TimesheetError::from)?;

    let input = DashboardInput {
        today,
        workday_hours: state.config.timesheet.workday_hours,
        week_entries,
        is_leave_today: LeaveRepository::new(db.clone())
            .is_on_leave(actor.user_id, today)
            .await?,
        assigned_projects: ProjectRepository::new(db.clone())
            .list_assigned(actor.user_id)
            .await?,
        favorites: FavoriteRepository::new(db).project_ids(actor.user_id).await?,
    };

    Ok(Json(DashboardService::build(input)))
}
