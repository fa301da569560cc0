//! Router tests that never reach the database.
//!
//! The state holds a disconnected connection, so every request here must be
//! answered by routing, authentication, authorization or input validation.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use rstest::rstest;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;
use tempo_api::{AppState, create_router};
use tempo_core::clock::FixedClock;
use tempo_shared::Role;
use tempo_shared::config::{
    AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, RateLimitConfig, ServerConfig,
    TimesheetConfig,
};

const SECRET: &str = "router-test-secret-that-is-long-enough";

fn test_config(max_requests: u32) -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        auth: AuthConfig {
            jwt_secret: SECRET.to_string(),
            access_token_expires_minutes: 60,
        },
        timesheet: TimesheetConfig::default(),
        rate_limit: RateLimitConfig {
            max_requests,
            window_secs: 60,
        },
        logging: LoggingConfig::default(),
    }
}

fn test_state(max_requests: u32) -> AppState {
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap(),
    ));
    AppState::with_clock(
        DatabaseConnection::Disconnected,
        test_config(max_requests),
        clock,
    )
    .unwrap()
}

fn token(state: &AppState, role: Role) -> String {
    state
        .jwt_service
        .generate_access_token(Uuid::now_v7(), role)
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, bearer: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {bearer}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn too_long_entry() -> Value {
    json!({
        "category_id": Uuid::now_v7(),
        "date": "2024-06-15",
        "hours": 25,
        "minutes": 0
    })
}

#[tokio::test]
async fn test_health_is_public_and_reports_database() {
    let app = create_router(test_state(10));

    let (status, body) = send(app, get("/api/v1/health", None)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "down");
}

#[rstest]
#[case(None)]
#[case(Some("not-a-jwt"))]
#[tokio::test]
async fn test_protected_routes_require_token(#[case] bearer: Option<&str>) {
    let app = create_router(test_state(10));

    let (status, body) = send(app, get("/api/v1/entries", bearer)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_settings_for_admin_only() {
    let state = test_state(10);
    let admin = token(&state, Role::Admin);
    let user = token(&state, Role::User);

    let (status, body) = send(
        create_router(state.clone()),
        get("/api/v1/admin/settings", Some(&admin)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timesheet"]["backdate_limit_days"], 7);
    assert_eq!(body["rate_limit"]["max_requests"], 10);
    assert!(body.get("jwt_secret").is_none());

    let (status, body) = send(
        create_router(state),
        get("/api/v1/admin/settings", Some(&user)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");
}

#[rstest]
#[case("/api/v1/reports?start_date=2024-06-01&end_date=2024-06-30")]
#[case("/api/v1/users")]
#[case("/api/v1/admin/stats")]
#[case("/api/v1/admin/reconciliation")]
#[case("/api/v1/admin/audit-logs")]
#[tokio::test]
async fn test_admin_routes_reject_users(#[case] uri: &str) {
    let state = test_state(10);
    let user = token(&state, Role::User);

    let (status, _) = send(create_router(state), get(uri, Some(&user))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_entry_rejects_too_long_duration() {
    let state = test_state(10);
    let user = token(&state, Role::User);

    let (status, body) = send(
        create_router(state),
        post_json("/api/v1/entries", &user, &too_long_entry()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_entry_is_rate_limited_per_user() {
    let state = test_state(1);
    let user = token(&state, Role::User);
    let other = token(&state, Role::User);

    let (status, _) = send(
        create_router(state.clone()),
        post_json("/api/v1/entries", &user, &too_long_entry()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        create_router(state.clone()),
        post_json("/api/v1/entries", &user, &too_long_entry()),
    )
    .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "RATE_LIMITED");

    // Separate window per user.
    let (status, _) = send(
        create_router(state),
        post_json("/api/v1/entries", &other, &too_long_entry()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
