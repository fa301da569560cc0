//! Audit sink trait.

use async_trait::async_trait;
use thiserror::Error;

use super::types::AuditRecord;

/// Audit persistence failure.
#[derive(Debug, Error)]
#[error("audit sink failed: {0}")]
pub struct AuditError(pub String);

/// Destination for audit records.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Persists one record.
    async fn record(&self, record: AuditRecord) -> Result<(), AuditError>;
}

/// Sink that drops every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditSink;

#[async_trait]
impl AuditSink for NoopAuditSink {
    async fn record(&self, _record: AuditRecord) -> Result<(), AuditError> {
        Ok(())
    }
}

/// Writes `record`, logging and swallowing any failure.
pub async fn record_quietly(sink: &dyn AuditSink, record: AuditRecord) {
    let action = record.action;
    let entity_type = record.entity_type;
    let entity_id = record.entity_id;

    if let Err(e) = sink.record(record).await {
        tracing::warn!(
            error = %e,
            %action,
            %entity_type,
            %entity_id,
            "Failed to write audit record"
        );
    }
}
