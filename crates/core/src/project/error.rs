//! Project error types.

use thiserror::Error;
use tempo_shared::AppError;
use tempo_shared::types::{ProjectId, UserId};

/// Project-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    /// Name empty or longer than 100 characters.
    #[error("Project name must be between 1 and 100 characters")]
    InvalidName,

    /// Color is not `#RRGGBB`.
    #[error("Color must be a hex value like #6366f1, got {0}")]
    InvalidColor(String),

    /// Budget below zero.
    #[error("Total hours cannot be negative")]
    NegativeBudget,

    /// Project missing or soft-deleted.
    #[error("Project not found: {0}")]
    NotFound(ProjectId),

    /// Caller is not assigned to the project.
    #[error("User {user_id} is not assigned to project {project_id}")]
    NotAssigned {
        /// User.
        user_id: UserId,
        /// Project.
        project_id: ProjectId,
    },
}

impl From<ProjectError> for AppError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound(_) => Self::NotFound(err.to_string()),
            ProjectError::NotAssigned { .. } => Self::Forbidden(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}
