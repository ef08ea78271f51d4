use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "organiser_ratings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub player_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub organiser_id: String,
    pub stars: i32,
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
