//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - Bearer token authentication middleware
//! - Error responses (`{"error", "message"}`)

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tempo_core::audit::AuditSink;
use tempo_core::clock::{Clock, SystemClock};
use tempo_core::ratelimit::{FixedWindowLimiter, MokaCounterStore};
use tempo_core::timesheet::{TimesheetPolicy, TimesheetService};
use tempo_db::{AuditLogRepository, TimesheetRepository};
use tempo_shared::{AppConfig, AppError, JwtConfig, JwtService};

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token validation.
    pub jwt_service: Arc<JwtService>,
    /// Validated configuration.
    pub config: Arc<AppConfig>,
    /// Time source for business dates and rate limit windows.
    pub clock: Arc<dyn Clock>,
    /// Limiter for entry creation.
    pub limiter: FixedWindowLimiter,
    /// Date rules for entry mutations.
    pub policy: TimesheetPolicy,
}

impl AppState {
    /// Builds the state from a connection and validated config.
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Result<Self, AppError> {
        Self::with_clock(db, config, Arc::new(SystemClock))
    }

    /// Builds the state with an explicit clock.
    pub fn with_clock(
        db: DatabaseConnection,
        config: AppConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let timezone = config
            .timesheet
            .tz()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let policy = TimesheetPolicy {
            backdate_limit_days: config.timesheet.backdate_limit_days,
            reject_future_dates: config.timesheet.reject_future_dates,
            timezone,
        };

        let window = std::time::Duration::from_secs(config.rate_limit.window_secs);
        let limiter = FixedWindowLimiter::new(
            Arc::new(MokaCounterStore::new(window)),
            Arc::clone(&clock),
            config.rate_limit.max_requests,
            chrono::Duration::from_std(window).map_err(|e| AppError::Internal(e.to_string()))?,
        );

        let jwt_service = JwtService::new(JwtConfig {
            secret: config.auth.jwt_secret.clone(),
            access_token_expires_minutes: config.auth.access_token_expires_minutes,
        });

        Ok(Self {
            db: Arc::new(db),
            jwt_service: Arc::new(jwt_service),
            config: Arc::new(config),
            clock,
            limiter,
            policy,
        })
    }

    /// Business date today in the configured timezone.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today(self.policy.timezone)
    }

    /// Audit sink backed by the audit log table.
    #[must_use]
    pub fn audit_sink(&self) -> Arc<dyn AuditSink> {
        Arc::new(AuditLogRepository::new((*self.db).clone()))
    }

    /// Timesheet service over the database store.
    #[must_use]
    pub fn timesheets(&self) -> TimesheetService<TimesheetRepository> {
        TimesheetService::new(
            TimesheetRepository::new((*self.db).clone()),
            self.audit_sink(),
            Arc::clone(&self.clock),
            self.policy,
        )
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
