//! `SeaORM` entity definitions.

pub mod assignments;
pub mod audit_logs;
pub mod categories;
pub mod favorite_projects;
pub mod leave_days;
pub mod projects;
pub mod timesheet_entries;
pub mod users;

pub mod prelude {
    //! Entity re-exports.

    pub use super::assignments::Entity as Assignments;
    pub use super::audit_logs::Entity as AuditLogs;
    pub use super::categories::Entity as Categories;
    pub use super::favorite_projects::Entity as FavoriteProjects;
    pub use super::leave_days::Entity as LeaveDays;
    pub use super::projects::Entity as Projects;
    pub use super::timesheet_entries::Entity as TimesheetEntries;
    pub use super::users::Entity as Users;
}
