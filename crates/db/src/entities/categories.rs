//! `SeaORM` Entity for categories table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub color: String,
    pub is_system: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::timesheet_entries::Entity")]
    TimesheetEntries,
}

impl Related<super::timesheet_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimesheetEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
