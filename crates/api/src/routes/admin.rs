//! Administrator routes: statistics, reconciliation, audit log and settings.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use tracing::warn;
use tempo_core::audit::AuditLogEntry;
use tempo_core::leave::{LeaveCalendar, LeaveQuery};
use tempo_core::reconciliation::{ReconciliationReport, ReconciliationService};
use tempo_core::reports::{AdminStats, ReportService};
use tempo_core::timesheet::{EntryQuery, TimesheetError, TimesheetStore};
use tempo_db::{AuditLogRepository, LeaveRepository, TimesheetRepository};
use tempo_shared::config::{RateLimitConfig, TimesheetConfig};

use crate::{AppState, error::ApiResult, middleware::AuthUser, routes::reports::load_names};

/// Number of audit records returned by the audit log listing.
const AUDIT_LOG_LIMIT: u64 = 100;

/// Creates the admin routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/stats", get(get_stats))
        .route("/admin/reconciliation", get(get_reconciliation))
        .route("/admin/audit-logs", get(list_audit_logs))
        .route("/admin/settings", get(get_settings))
}

/// Effective runtime settings. Secrets are never included.
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    /// Timesheet rules.
    pub timesheet: TimesheetConfig,
    /// Entry creation rate limit.
    pub rate_limit: RateLimitConfig,
    /// Accepted token lifetime.
    pub access_token_expires_minutes: i64,
}

/// GET `/admin/stats` - Breakdowns over all live entries and who is on leave today.
async fn get_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<AdminStats>> {
    auth.require_admin()?;
    let db = (*state.db).clone();
    let today = state.today();

    let entries = TimesheetRepository::new(db.clone())
        .list_entries(&EntryQuery::default())
        .await
        .map_err(TimesheetError::from)?;
    let names = load_names(&state).await?;

    let leave_today = LeaveRepository::new(db)
        .list(&LeaveQuery {
            user_id: None,
            start_date: Some(today),
            end_date: Some(today),
        })
        .await?;
    let users_on_leave = LeaveCalendar::new(&leave_today).users_on(today, &names.users);

    Ok(Json(ReportService::admin_stats(&entries, &names, users_on_leave)))
}

/// GET `/admin/reconciliation` - Compare stored counters with recomputed totals.
async fn get_reconciliation(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ReconciliationReport>> {
    auth.require_admin()?;
    let (projects, entries) = TimesheetRepository::new((*state.db).clone())
        .reconciliation_snapshot()
        .await?;

    let report = ReconciliationService::reconcile(&projects, &entries);
    if !report.is_consistent() {
        warn!(drifted = report.drifted.len(), "Project counters drifted from entries");
    }

    Ok(Json(report))
}

/// GET `/admin/audit-logs` - Latest audit records.
async fn list_audit_logs(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<AuditLogEntry>>> {
    auth.require_admin()?;
    let logs = AuditLogRepository::new((*state.db).clone())
        .latest(AUDIT_LOG_LIMIT)
        .await?;
    Ok(Json(logs))
}

/// GET `/admin/settings` - Effective runtime settings.
async fn get_settings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<SettingsResponse>> {
    auth.require_admin()?;
    Ok(Json(SettingsResponse {
        timesheet: state.config.timesheet.clone(),
        rate_limit: state.config.rate_limit,
        access_token_expires_minutes: state.config.auth.access_token_expires_minutes,
    }))
}
