//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - The Postgres implementation of the timesheet store
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    AssignmentError, AssignmentRepository, AuditLogRepository, CategoryRepository, FavoriteError,
    FavoriteRepository, LeaveDayError, LeaveRepository, ProjectRepository, TimesheetRepository,
    UserRepository,
};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tempo_shared::config::DatabaseConfig;

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Connects with the pool limits from configuration.
pub async fn connect_with(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .sqlx_logging(false);
    Database::connect(options).await
}
