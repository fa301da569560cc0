//! Audit record types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tempo_shared::types::{AuditLogId, UserId};
use uuid::Uuid;

/// What happened to the audited entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// Entity created.
    Create,
    /// Entity changed.
    Update,
    /// Entity soft-deleted.
    Delete,
    /// Project archived.
    Archive,
    /// Project reactivated or entry undeleted.
    Restore,
    /// User assigned to a project.
    Assign,
    /// User removed from a project.
    Unassign,
    /// Project budget changed.
    BudgetChange,
}

impl AuditAction {
    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Archive => "ARCHIVE",
            Self::Restore => "RESTORE",
            Self::Assign => "ASSIGN",
            Self::Unassign => "UNASSIGN",
            Self::BudgetChange => "BUDGET_CHANGE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(Self::Create),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            "ARCHIVE" => Ok(Self::Archive),
            "RESTORE" => Ok(Self::Restore),
            "ASSIGN" => Ok(Self::Assign),
            "UNASSIGN" => Ok(Self::Unassign),
            "BUDGET_CHANGE" => Ok(Self::BudgetChange),
            other => Err(format!("unknown audit action: {other}")),
        }
    }
}

/// Kind of entity an audit record is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditEntity {
    /// A project.
    Project,
    /// A user-to-project assignment.
    Assignment,
    /// A timesheet entry.
    Timesheet,
    /// A leave day.
    LeaveDay,
}

impl AuditEntity {
    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "Project",
            Self::Assignment => "Assignment",
            Self::Timesheet => "Timesheet",
            Self::LeaveDay => "LeaveDay",
        }
    }
}

impl fmt::Display for AuditEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditEntity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Project" => Ok(Self::Project),
            "Assignment" => Ok(Self::Assignment),
            "Timesheet" => Ok(Self::Timesheet),
            "LeaveDay" => Ok(Self::LeaveDay),
            other => Err(format!("unknown audit entity: {other}")),
        }
    }
}

/// A record handed to the audit sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRecord {
    /// User who performed the action.
    pub actor_id: UserId,
    /// Action performed.
    pub action: AuditAction,
    /// Kind of entity.
    pub entity_type: AuditEntity,
    /// Entity ID.
    pub entity_id: Uuid,
    /// State before the action.
    pub old_value: Option<Value>,
    /// State after the action.
    pub new_value: Option<Value>,
}

impl AuditRecord {
    /// Creates a record with no before/after values.
    #[must_use]
    pub const fn new(
        actor_id: UserId,
        action: AuditAction,
        entity_type: AuditEntity,
        entity_id: Uuid,
    ) -> Self {
        Self {
            actor_id,
            action,
            entity_type,
            entity_id,
            old_value: None,
            new_value: None,
        }
    }

    /// Attaches the previous state.
    #[must_use]
    pub fn with_old(mut self, value: Value) -> Self {
        self.old_value = Some(value);
        self
    }

    /// Attaches the new state.
    #[must_use]
    pub fn with_new(mut self, value: Value) -> Self {
        self.new_value = Some(value);
        self
    }
}

/// A persisted audit record, as listed to administrators.
#[derive(Debug, Clone, Serialize)]
pub struct AuditLogEntry {
    /// Record ID.
    pub id: AuditLogId,
    /// User who performed the action.
    pub actor_id: UserId,
    /// Actor's display name, if known.
    pub actor_name: Option<String>,
    /// Action performed.
    pub action: AuditAction,
    /// Kind of entity.
    pub entity_type: AuditEntity,
    /// Entity ID.
    pub entity_id: Uuid,
    /// State before the action.
    pub old_value: Option<Value>,
    /// State after the action.
    pub new_value: Option<Value>,
    /// When the record was written.
    pub created_at: DateTime<Utc>,
}
