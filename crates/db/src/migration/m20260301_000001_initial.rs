//! Initial database migration.
//!
//! Creates the timesheet tables, their constraints and indexes, and seeds
//! the system categories.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: PEOPLE & REFERENCE DATA
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(CATEGORIES_SQL).await?;

        // ============================================================
        // PART 2: PROJECTS
        // ============================================================
        db.execute_unprepared(PROJECTS_SQL).await?;
        db.execute_unprepared(ASSIGNMENTS_SQL).await?;
        db.execute_unprepared(FAVORITE_PROJECTS_SQL).await?;

        // ============================================================
        // PART 3: TIME
        // ============================================================
        db.execute_unprepared(TIMESHEET_ENTRIES_SQL).await?;
        db.execute_unprepared(LEAVE_DAYS_SQL).await?;

        // ============================================================
        // PART 4: AUDIT
        // ============================================================
        db.execute_unprepared(AUDIT_LOGS_SQL).await?;

        // ============================================================
        // PART 5: SEED DATA
        // ============================================================
        db.execute_unprepared(SEED_CATEGORIES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

// User IDs come from the identity provider, so user columns elsewhere
// carry no foreign key to this read model.
const USERS_SQL: &str = r"
CREATE TABLE users (
    id              UUID PRIMARY KEY,
    name            VARCHAR(255) NOT NULL,
    email           VARCHAR(255) NOT NULL UNIQUE,
    role            VARCHAR(16) NOT NULL DEFAULT 'USER' CHECK (role IN ('ADMIN', 'USER')),
    is_active       BOOLEAN NOT NULL DEFAULT TRUE,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const CATEGORIES_SQL: &str = r"
CREATE TABLE categories (
    id              UUID PRIMARY KEY,
    name            VARCHAR(100) NOT NULL UNIQUE,
    color           VARCHAR(7) NOT NULL,
    is_system       BOOLEAN NOT NULL DEFAULT FALSE,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const PROJECTS_SQL: &str = r"
CREATE TABLE projects (
    id              UUID PRIMARY KEY,
    name            VARCHAR(100) NOT NULL,
    color           VARCHAR(7) NOT NULL,
    status          VARCHAR(16) NOT NULL DEFAULT 'ACTIVE' CHECK (status IN ('ACTIVE', 'ARCHIVED')),
    is_deleted      BOOLEAN NOT NULL DEFAULT FALSE,
    total_hours     NUMERIC(12, 2) NOT NULL DEFAULT 0 CHECK (total_hours >= 0),
    used_minutes    BIGINT NOT NULL DEFAULT 0,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_projects_listing ON projects (is_deleted, status, name);
";

const ASSIGNMENTS_SQL: &str = r"
CREATE TABLE assignments (
    id              UUID PRIMARY KEY,
    user_id         UUID NOT NULL,
    project_id      UUID NOT NULL REFERENCES projects(id),
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT uq_assignments_user_project UNIQUE (user_id, project_id)
);

CREATE INDEX idx_assignments_project ON assignments (project_id);
";

const FAVORITE_PROJECTS_SQL: &str = r"
CREATE TABLE favorite_projects (
    id              UUID PRIMARY KEY,
    user_id         UUID NOT NULL,
    project_id      UUID NOT NULL REFERENCES projects(id),
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT uq_favorite_projects_user_project UNIQUE (user_id, project_id)
);
";

const TIMESHEET_ENTRIES_SQL: &str = r"
CREATE TABLE timesheet_entries (
    id              UUID PRIMARY KEY,
    user_id         UUID NOT NULL,
    project_id      UUID REFERENCES projects(id),
    category_id     UUID REFERENCES categories(id),
    date            DATE NOT NULL,
    hours           INTEGER NOT NULL CHECK (hours BETWEEN 0 AND 24),
    minutes         INTEGER NOT NULL CHECK (minutes BETWEEN 0 AND 59 AND minutes % 15 = 0),
    notes           TEXT CHECK (char_length(notes) <= 500),
    is_deleted      BOOLEAN NOT NULL DEFAULT FALSE,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT chk_entry_single_target CHECK ((project_id IS NULL) <> (category_id IS NULL)),
    CONSTRAINT chk_entry_max_duration CHECK (hours * 60 + minutes <= 1440)
);

CREATE INDEX idx_entries_user_date ON timesheet_entries (user_id, date) WHERE NOT is_deleted;
CREATE INDEX idx_entries_project ON timesheet_entries (project_id) WHERE NOT is_deleted;
CREATE INDEX idx_entries_date ON timesheet_entries (date);
";

const LEAVE_DAYS_SQL: &str = r"
CREATE TABLE leave_days (
    id              UUID PRIMARY KEY,
    user_id         UUID NOT NULL,
    date            DATE NOT NULL,
    leave_type      VARCHAR(16) NOT NULL DEFAULT 'OTHER'
                    CHECK (leave_type IN ('ANNUAL', 'SICK', 'HOLIDAY', 'OTHER')),
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT uq_leave_days_user_date UNIQUE (user_id, date)
);

CREATE INDEX idx_leave_days_date ON leave_days (date);
";

const AUDIT_LOGS_SQL: &str = r"
CREATE TABLE audit_logs (
    id              UUID PRIMARY KEY,
    actor_id        UUID NOT NULL,
    action          VARCHAR(32) NOT NULL,
    entity_type     VARCHAR(32) NOT NULL,
    entity_id       UUID NOT NULL,
    old_value       JSONB,
    new_value       JSONB,
    created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_audit_logs_created ON audit_logs (created_at DESC);
CREATE INDEX idx_audit_logs_entity ON audit_logs (entity_type, entity_id);
";

const SEED_CATEGORIES_SQL: &str = r"
INSERT INTO categories (id, name, color, is_system) VALUES
    (gen_random_uuid(), 'R&D',      '#8b5cf6', TRUE),
    (gen_random_uuid(), 'Meetings', '#3b82f6', TRUE),
    (gen_random_uuid(), 'Training', '#10b981', TRUE),
    (gen_random_uuid(), 'Downtime', '#6b7280', TRUE),
    (gen_random_uuid(), 'Admin',    '#f59e0b', TRUE);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS audit_logs CASCADE;
DROP TABLE IF EXISTS leave_days CASCADE;
DROP TABLE IF EXISTS timesheet_entries CASCADE;
DROP TABLE IF EXISTS favorite_projects CASCADE;
DROP TABLE IF EXISTS assignments CASCADE;
DROP TABLE IF EXISTS projects CASCADE;
DROP TABLE IF EXISTS categories CASCADE;
DROP TABLE IF EXISTS users CASCADE;
";
