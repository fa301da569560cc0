//! `SeaORM` Entity for projects table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub status: String,
    pub is_deleted: bool,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_hours: Decimal,
    pub used_minutes: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::timesheet_entries::Entity")]
    TimesheetEntries,
    #[sea_orm(has_many = "super::assignments::Entity")]
    Assignments,
    #[sea_orm(has_many = "super::favorite_projects::Entity")]
    FavoriteProjects,
}

impl Related<super::timesheet_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimesheetEntries.def()
    }
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl Related<super::favorite_projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FavoriteProjects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
