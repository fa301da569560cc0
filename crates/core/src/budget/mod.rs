//! Derived budget view.
//!
//! `(total_hours, used_minutes) -> (remaining, percentage, status band)`.
//! Nothing here is stored; every dashboard, project list and report derives
//! the view through [`BudgetService::derive`].

pub mod service;
pub mod types;


pub use service::BudgetService;
pub use types::{BudgetView, StatusBand};
