//! Row to domain conversions.

use chrono::Utc;
use sea_orm::{DbErr, Set};
use tempo_core::audit::{AuditAction, AuditEntity, AuditLogEntry, AuditRecord};
use tempo_core::entry::{Entry, EntryDuration, EntryTarget};
use tempo_core::leave::{LeaveDay, LeaveType};
use tempo_core::project::{Assignment, Project, ProjectStatus};
use tempo_shared::types::{
    AssignmentId, AuditLogId, CategoryId, EntryId, LeaveDayId, ProjectId, UserId,
};
use uuid::Uuid;

use crate::entities::{assignments, audit_logs, leave_days, projects, timesheet_entries};

fn corrupt(table: &str, id: Uuid, detail: impl std::fmt::Display) -> DbErr {
    DbErr::Custom(format!("corrupt {table} row {id}: {detail}"))
}

pub(crate) fn entry_from_model(model: timesheet_entries::Model) -> Result<Entry, DbErr> {
    let target = match (model.project_id, model.category_id) {
        (Some(project_id), None) => EntryTarget::Project(ProjectId::from_uuid(project_id)),
        (None, Some(category_id)) => EntryTarget::Category(CategoryId::from_uuid(category_id)),
        _ => return Err(corrupt("timesheet_entries", model.id, "invalid target")),
    };

    Ok(Entry {
        id: EntryId::from_uuid(model.id),
        owner_id: UserId::from_uuid(model.user_id),
        target,
        date: model.date,
        duration: EntryDuration {
            hours: model.hours,
            minutes: model.minutes,
        },
        notes: model.notes,
        is_deleted: model.is_deleted,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

pub(crate) fn entry_active_model(entry: &Entry) -> timesheet_entries::ActiveModel {
    timesheet_entries::ActiveModel {
        id: Set(entry.id.into_inner()),
        user_id: Set(entry.owner_id.into_inner()),
        project_id: Set(entry.target.project_id().map(ProjectId::into_inner)),
        category_id: Set(entry.target.category_id().map(CategoryId::into_inner)),
        date: Set(entry.date),
        hours: Set(entry.duration.hours),
        minutes: Set(entry.duration.minutes),
        notes: Set(entry.notes.clone()),
        is_deleted: Set(entry.is_deleted),
        created_at: Set(entry.created_at.into()),
        updated_at: Set(entry.updated_at.into()),
    }
}

pub(crate) fn project_from_model(model: projects::Model) -> Result<Project, DbErr> {
    let status = model
        .status
        .parse::<ProjectStatus>()
        .map_err(|e: String| corrupt("projects", model.id, e))?;

    Ok(Project {
        id: ProjectId::from_uuid(model.id),
        name: model.name,
        color: model.color,
        status,
        is_deleted: model.is_deleted,
        total_hours: model.total_hours,
        used_minutes: model.used_minutes,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

pub(crate) fn assignment_from_model(model: assignments::Model) -> Assignment {
    Assignment {
        id: AssignmentId::from_uuid(model.id),
        user_id: UserId::from_uuid(model.user_id),
        project_id: ProjectId::from_uuid(model.project_id),
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub(crate) fn leave_from_model(model: leave_days::Model) -> Result<LeaveDay, DbErr> {
    let leave_type = model
        .leave_type
        .parse::<LeaveType>()
        .map_err(|e: String| corrupt("leave_days", model.id, e))?;

    Ok(LeaveDay {
        id: LeaveDayId::from_uuid(model.id),
        user_id: UserId::from_uuid(model.user_id),
        date: model.date,
        leave_type,
        created_at: model.created_at.with_timezone(&Utc),
    })
}

pub(crate) fn audit_active_model(record: AuditRecord) -> audit_logs::ActiveModel {
    audit_logs::ActiveModel {
        id: Set(AuditLogId::new().into_inner()),
        actor_id: Set(record.actor_id.into_inner()),
        action: Set(record.action.as_str().to_string()),
        entity_type: Set(record.entity_type.as_str().to_string()),
        entity_id: Set(record.entity_id),
        old_value: Set(record.old_value),
        new_value: Set(record.new_value),
        created_at: Set(Utc::now().into()),
    }
}

pub(crate) fn audit_from_model(
    model: audit_logs::Model,
    actor_name: Option<String>,
) -> Result<AuditLogEntry, DbErr> {
    let action = model
        .action
        .parse::<AuditAction>()
        .map_err(|e: String| corrupt("audit_logs", model.id, e))?;
    let entity_type = model
        .entity_type
        .parse::<AuditEntity>()
        .map_err(|e: String| corrupt("audit_logs", model.id, e))?;

    Ok(AuditLogEntry {
        id: AuditLogId::from_uuid(model.id),
        actor_id: UserId::from_uuid(model.actor_id),
        actor_name,
        action,
        entity_type,
        entity_id: model.entity_id,
        old_value: model.old_value,
        new_value: model.new_value,
        created_at: model.created_at.with_timezone(&Utc),
    })
}
