//! Core timesheet and budget logic for Tempo.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Storage and audit persistence are reached through the `TimesheetStore` and
//! `AuditSink` traits, implemented by the db crate.
//!
//! # Modules
//!
//! - `entry` - Timesheet entry model, duration rounding and input validation
//! - `accounting` - Signed counter deltas for every entry transition
//! - `budget` - Derived budget view (remaining, percentage, status band)
//! - `timesheet` - Entry mutations over the store, audit and clock seams
//! - `reports` - Aggregation engine and CSV export
//! - `reconciliation` - Stored counters vs. recomputed totals
//! - `project` - Project validation and listing rules
//! - `leave` - Leave calendar
//! - `dashboard` - Today/week progress for a user
//! - `ratelimit` - Fixed-window rate limiting
//! - `audit` - Audit records and the sink trait
//! - `clock` - Injected time source and business date

pub mod accounting;
pub mod audit;
pub mod budget;
pub mod clock;
pub mod dashboard;
pub mod entry;
pub mod leave;
pub mod project;
pub mod ratelimit;
pub mod reconciliation;
pub mod reports;
pub mod timesheet;
