//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

mod convert;

pub mod assignment;
pub mod audit_log;
pub mod category;
pub mod favorite;
pub mod leave;
pub mod project;
pub mod timesheet;
pub mod user;

pub use assignment::{AssignmentError, AssignmentRepository};
pub use audit_log::AuditLogRepository;
pub use category::CategoryRepository;
pub use favorite::{FavoriteError, FavoriteRepository};
pub use leave::{LeaveDayError, LeaveRepository};
pub use project::ProjectRepository;
pub use timesheet::TimesheetRepository;
pub use user::UserRepository;
