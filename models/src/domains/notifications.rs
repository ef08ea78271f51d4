use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub organiser_id: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub read: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organisers::Entity",
        from = "Column::OrganiserId",
        to = "super::organisers::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Organisers,
}

impl Related<super::organisers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organisers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
