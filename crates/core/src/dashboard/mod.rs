//! A user's progress for the current day and week.

pub mod service;
pub mod types;

pub use service::DashboardService;
pub use types::{Dashboard, DashboardInput, TodaySummary, WeekSummary};
