//! Timesheet entry mutations.
//!
//! Every create, update, delete, restore and copy goes through
//! [`TimesheetService`]: validate, authorize, plan counter deltas, then hand
//! entry writes and deltas to [`TimesheetStore::commit`] as one unit.

pub mod error;
pub mod service;
pub mod store;

#[cfg(test)]
mod memory;
#[cfg(test)]
mod tests;

pub use error::TimesheetError;
pub use service::{TimesheetPolicy, TimesheetService};
pub use store::{EntryChange, EntryQuery, EntryWrite, StoreError, TimesheetStore};
