use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::TournamentStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "tournaments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub tid: String,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub start_date: DateTimeWithTimeZone,
    pub end_date: DateTimeWithTimeZone,
    pub entry_fee: i64,
    pub prize_pool: i64,
    pub status: TournamentStatus,
    pub organiser_id: String,
    pub winner_team_id: Option<String>,
    pub revenue: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
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
    #[sea_orm(has_many = "super::tournament_entries::Entity")]
    TournamentEntries,
    #[sea_orm(has_many = "super::participations::Entity")]
    Participations,
}

impl Related<super::organisers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organisers.def()
    }
}

impl Related<super::tournament_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TournamentEntries.def()
    }
}

impl Related<super::participations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Participations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
