//! Leave calendar: day-granularity leave markers per user.

pub mod calendar;
pub mod error;
pub mod types;

pub use calendar::{LeaveCalendar, LeaveService};
pub use error::LeaveError;
pub use types::{LeaveDay, LeaveQuery, LeaveType, MarkLeaveInput, UserOnLeave};
