//! Projects: validation, update planning and listing order.

pub mod error;
pub mod service;
pub mod types;


pub use error::ProjectError;
pub use service::{PROJECT_COLORS, ProjectService, ProjectUpdatePlan};
pub use types::{
    Assignment, CreateProjectInput, NewProject, Project, ProjectStatus, ProjectSummary,
    UpdateProjectInput,
};
