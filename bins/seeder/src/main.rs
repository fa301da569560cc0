//! Database seeder for Tempo development and testing.
//!
//! Seeds the system categories, an admin and a regular user, and one
//! budgeted project the user is assigned to. Prints bearer tokens for both
//! users. Safe to run repeatedly.
//!
//! Usage: cargo run --bin seeder

use rust_decimal::Decimal;
use tempo_core::project::{NewProject, Project};
use tempo_db::{
    AssignmentError, AssignmentRepository, CategoryRepository, ProjectRepository, UserRepository,
};
use tempo_shared::types::UserId;
use tempo_shared::{AppConfig, JwtConfig, JwtService, Role};

/// System categories with their display colors.
const CATEGORIES: [(&str, &str); 5] = [
    ("R&D", "#8b5cf6"),
    ("Meetings", "#3b82f6"),
    ("Training", "#22c55e"),
    ("Downtime", "#f97316"),
    ("Admin", "#64748b"),
];

const SAMPLE_PROJECT: &str = "Internal Tools";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    println!("Connecting to database...");
    let db = tempo_db::connect_with(&config.database).await?;

    println!("Seeding categories...");
    let categories = CategoryRepository::new(db.clone());
    for (name, color) in CATEGORIES {
        categories.ensure(name, color, true).await?;
    }

    println!("Seeding users...");
    let users = UserRepository::new(db.clone());
    let admin = users.upsert("Admin", "admin@tempo.dev", Role::Admin).await?;
    let user = users.upsert("Test User", "user@tempo.dev", Role::User).await?;

    println!("Seeding sample project...");
    let project = seed_project(&ProjectRepository::new(db.clone())).await?;
    match AssignmentRepository::new(db)
        .assign(UserId::from_uuid(user.id), project.id)
        .await
    {
        Ok(_) => println!("  Assigned {} to {}", user.name, project.name),
        Err(AssignmentError::AlreadyAssigned) => println!("  Assignment already exists, skipping..."),
        Err(e) => return Err(e.into()),
    }

    let jwt = JwtService::new(JwtConfig {
        secret: config.auth.jwt_secret.clone(),
        access_token_expires_minutes: config.auth.access_token_expires_minutes,
    });
    println!();
    println!("Development tokens:");
    println!("  admin: {}", jwt.generate_access_token(admin.id, Role::Admin)?);
    println!("  user:  {}", jwt.generate_access_token(user.id, Role::User)?);

    println!("Seeding complete!");
    Ok(())
}

/// Returns the sample project, creating it if missing.
async fn seed_project(repo: &ProjectRepository) -> anyhow::Result<Project> {
    if let Some(existing) = repo
        .list(true)
        .await?
        .into_iter()
        .find(|p| p.name == SAMPLE_PROJECT)
    {
        println!("  Sample project already exists, skipping...");
        return Ok(existing);
    }

    let project = repo
        .create(NewProject {
            name: SAMPLE_PROJECT.to_string(),
            color: "#6366f1".to_string(),
            total_hours: Decimal::from(120),
        })
        .await?;
    Ok(project)
}
