//! Error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use tempo_core::leave::LeaveError;
use tempo_core::project::ProjectError;
use tempo_core::ratelimit::RateLimitExceeded;
use tempo_core::reports::ReportError;
use tempo_core::timesheet::TimesheetError;
use tempo_db::{AssignmentError, FavoriteError, LeaveDayError};
use tempo_shared::AppError;
use tracing::error;

/// Handler error, rendered as `{"error": CODE, "message": text}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        if err.is_server_error() {
            error!(error = %err, "Request failed");
        }

        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(json!({
            "error": err.error_code(),
            "message": err.public_message(),
        }));

        (status, body).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

macro_rules! via_app_error {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ApiError {
                fn from(err: $ty) -> Self {
                    Self(err.into())
                }
            }
        )*
    };
}

via_app_error!(
    TimesheetError,
    ProjectError,
    LeaveError,
    ReportError,
    RateLimitExceeded,
    AssignmentError,
    FavoriteError,
    LeaveDayError,
);
