//! Audit trail.
//!
//! Records are fire-and-forget: a failing sink never fails the operation
//! that produced the record.

pub mod sink;
pub mod types;

pub use sink::{AuditError, AuditSink, NoopAuditSink, record_quietly};
pub use types::{AuditAction, AuditEntity, AuditLogEntry, AuditRecord};
