//! Timesheet reporting.
//!
//! This module recomputes every figure from the entry rows themselves and never
//! reads the stored project counters, so it doubles as the oracle for them:
//! - Totals with billable/internal split
//! - Per-project breakdown with per-user subtotals
//! - Per-user breakdown with per-project subtotals
//! - CSV export

pub mod error;
pub mod export;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use export::{export_filename, render_csv};
pub use service::ReportService;
pub use types::*;
