use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::BannedEntity;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "ban_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub entity_id: String,
    pub entity_type: BannedEntity,
    #[sea_orm(column_type = "Text")]
    pub reason: String,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
