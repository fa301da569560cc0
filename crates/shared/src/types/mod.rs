//! Common types used across the application.

pub mod hours;
pub mod id;

pub use hours::{MINUTES_PER_HOUR, format_hours, hours_to_minutes, minutes_to_hours};
pub use id::*;
