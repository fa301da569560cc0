//! Audit log repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect};
use tempo_core::audit::{AuditError, AuditLogEntry, AuditRecord, AuditSink};

use super::convert::{audit_active_model, audit_from_model};
use crate::entities::{audit_logs, users};

/// Audit log repository. Also the production [`AuditSink`].
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    db: DatabaseConnection,
}

impl AuditLogRepository {
    /// Creates a new audit log repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Latest `limit` records, newest first, with actor names.
    pub async fn latest(&self, limit: u64) -> Result<Vec<AuditLogEntry>, DbErr> {
        audit_logs::Entity::find()
            .find_also_related(users::Entity)
            .order_by_desc(audit_logs::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(log, actor)| audit_from_model(log, actor.map(|u| u.name)))
            .collect()
    }
}

#[async_trait]
impl AuditSink for AuditLogRepository {
    async fn record(&self, record: AuditRecord) -> Result<(), AuditError> {
        audit_active_model(record)
            .insert(&self.db)
            .await
            .map_err(|e| AuditError(e.to_string()))?;
        Ok(())
    }
}
