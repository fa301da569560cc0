//! Project validation and update planning.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use tempo_shared::{Actor, types::UserId};

use super::error::ProjectError;
use super::types::{
    CreateProjectInput, NewProject, Project, ProjectStatus, ProjectSummary, UpdateProjectInput,
};
use crate::audit::{AuditAction, AuditEntity, AuditRecord};

/// Palette used when a project is created without a color.
pub const PROJECT_COLORS: [&str; 10] = [
    "#6366f1", "#8b5cf6", "#ec4899", "#f43f5e", "#f97316", "#eab308", "#22c55e", "#14b8a6",
    "#06b6d4", "#3b82f6",
];

const MAX_NAME_LEN: usize = 100;

/// Result of applying an update to a project.
#[derive(Debug, Clone)]
pub struct ProjectUpdatePlan {
    /// Project after the update.
    pub project: Project,
    /// Budget and status changes worth auditing.
    pub audit: Vec<AuditRecord>,
}

/// Service for project rules.
pub struct ProjectService;

impl ProjectService {
    /// Validates a create request.
    ///
    /// `palette_seed` picks the fallback color (usually the current project count).
    pub fn validate_create(
        input: CreateProjectInput,
        palette_seed: usize,
    ) -> Result<NewProject, ProjectError> {
        let name = Self::validate_name(&input.name)?;
        let color = match input.color {
            Some(color) => Self::validate_color(&color)?,
            None => PROJECT_COLORS[palette_seed % PROJECT_COLORS.len()].to_string(),
        };
        let total_hours = input.total_hours.unwrap_or(Decimal::ZERO);
        Self::validate_total_hours(total_hours)?;

        Ok(NewProject {
            name,
            color,
            total_hours,
        })
    }

    /// Applies `input` to `existing`, collecting BUDGET_CHANGE and
    /// ARCHIVE/RESTORE audit records for actual changes.
    pub fn plan_update(
        actor_id: UserId,
        existing: &Project,
        input: UpdateProjectInput,
        now: DateTime<Utc>,
    ) -> Result<ProjectUpdatePlan, ProjectError> {
        let mut project = existing.clone();
        let mut audit = Vec::new();
        let entity_id = existing.id.into_inner();

        if let Some(name) = input.name {
            project.name = Self::validate_name(&name)?;
        }
        if let Some(color) = input.color {
            project.color = Self::validate_color(&color)?;
        }
        if let Some(total_hours) = input.total_hours {
            Self::validate_total_hours(total_hours)?;
            if total_hours != existing.total_hours {
                audit.push(
                    AuditRecord::new(actor_id, AuditAction::BudgetChange, AuditEntity::Project, entity_id)
                        .with_old(json!({ "total_hours": existing.total_hours }))
                        .with_new(json!({ "total_hours": total_hours })),
                );
            }
            project.total_hours = total_hours;
        }
        if let Some(status) = input.status {
            if status != existing.status {
                let action = match status {
                    ProjectStatus::Archived => AuditAction::Archive,
                    ProjectStatus::Active => AuditAction::Restore,
                };
                audit.push(
                    AuditRecord::new(actor_id, action, AuditEntity::Project, entity_id)
                        .with_old(json!({ "status": existing.status }))
                        .with_new(json!({ "status": status })),
                );
            }
            project.status = status;
        }

        if project != *existing {
            project.updated_at = now;
        }

        Ok(ProjectUpdatePlan { project, audit })
    }

    /// Audit record for a soft delete.
    #[must_use]
    pub fn delete_record(actor_id: UserId, project: &Project) -> AuditRecord {
        AuditRecord::new(
            actor_id,
            AuditAction::Delete,
            AuditEntity::Project,
            project.id.into_inner(),
        )
        .with_old(json!({ "name": project.name }))
    }

    /// Checks that `actor` may view `project`.
    pub fn ensure_visible(
        actor: &Actor,
        project: &Project,
        is_assigned: bool,
    ) -> Result<(), ProjectError> {
        if project.is_deleted {
            return Err(ProjectError::NotFound(project.id));
        }
        if actor.is_admin() || is_assigned {
            Ok(())
        } else {
            Err(ProjectError::NotAssigned {
                user_id: actor.user_id,
                project_id: project.id,
            })
        }
    }

    /// Orders a project list: favorites first, then by name.
    pub fn sort_for_listing(projects: &mut [ProjectSummary]) {
        projects.sort_by(|a, b| {
            b.is_favorite
                .cmp(&a.is_favorite)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
    }

    fn validate_name(name: &str) -> Result<String, ProjectError> {
        let name = name.trim();
        let len = name.chars().count();
        if len == 0 || len > MAX_NAME_LEN {
            return Err(ProjectError::InvalidName);
        }
        Ok(name.to_string())
    }

    fn validate_color(color: &str) -> Result<String, ProjectError> {
        let valid = color.len() == 7
            && color.starts_with('#')
            && color[1..].chars().all(|c| c.is_ascii_hexdigit());
        if valid {
            Ok(color.to_string())
        } else {
            Err(ProjectError::InvalidColor(color.to_string()))
        }
    }

    fn validate_total_hours(total_hours: Decimal) -> Result<(), ProjectError> {
        if total_hours < Decimal::ZERO {
            return Err(ProjectError::NegativeBudget);
        }
        Ok(())
    }
}
