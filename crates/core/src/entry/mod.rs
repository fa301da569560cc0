//! Timesheet entry model.
//!
//! - Entry target (project XOR category)
//! - Duration rounding to 15-minute slots
//! - Input validation (notes, backdate window)

pub mod error;
pub mod types;
pub mod validation;

#[cfg(test)]
mod props;

pub use error::EntryError;
pub use types::{CreateEntryInput, Entry, EntryDuration, EntryTarget, UpdateEntryInput};
pub use validation::{
    MAX_NOTES_LEN, check_entry_date, normalize_notes, resolve_target, round_minutes,
};
