//! Tempo API Server
//!
//! Main entry point for the Tempo timesheet service.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tempo_api::{AppState, create_router};
use tempo_db::connect_with;
use tempo_shared::AppConfig;

const DEFAULT_FILTER: &str = "tempo=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(config.logging.json, config.logging.filter.as_deref());

    let db = connect_with(&config.database).await?;
    info!("Connected to database");

    info!(
        timezone = %config.timesheet.timezone,
        backdate_limit_days = config.timesheet.backdate_limit_days,
        rate_limit = config.rate_limit.max_requests,
        rate_window_secs = config.rate_limit.window_secs,
        "Timesheet rules loaded"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(db, config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// `RUST_LOG` wins over the configured filter.
fn init_tracing(json: bool, filter: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| filter.unwrap_or(DEFAULT_FILTER).into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
