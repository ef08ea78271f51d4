use models::domains::{organisers, participations, players, tournament_entries, tournaments};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(tournaments::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(tournaments::Column::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::Tid)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::Name)
                            .string()
                            .char_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::Description)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::EntryFee)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::PrizePool)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::OrganiserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::WinnerTeamId)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::Revenue)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(tournaments::Column::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-tournaments-organiser_id")
                            .from(tournaments::Entity, tournaments::Column::OrganiserId)
                            .to(organisers::Entity, organisers::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(tournament_entries::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(tournament_entries::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(tournament_entries::Column::TournamentId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournament_entries::Column::TeamId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournament_entries::Column::TeamName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournament_entries::Column::Points)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(tournament_entries::Column::Ranking)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(tournament_entries::Column::RegisteredAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-tournament_entries-tournament_id")
                            .from(
                                tournament_entries::Entity,
                                tournament_entries::Column::TournamentId,
                            )
                            .to(tournaments::Entity, tournaments::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // One points-table row per registered team.
        manager
            .create_index(
                Index::create()
                    .name("idx-tournament_entries-tournament_team")
                    .table(tournament_entries::Entity)
                    .col(tournament_entries::Column::TournamentId)
                    .col(tournament_entries::Column::TeamId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(participations::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(participations::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(participations::Column::PlayerId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(participations::Column::TournamentId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(participations::Column::TeamId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(participations::Column::Won)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(participations::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-participations-player_id")
                            .from(participations::Entity, participations::Column::PlayerId)
                            .to(players::Entity, players::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-participations-tournament_id")
                            .from(
                                participations::Entity,
                                participations::Column::TournamentId,
                            )
                            .to(tournaments::Entity, tournaments::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-participations-player_tournament")
                    .table(participations::Entity)
                    .col(participations::Column::PlayerId)
                    .col(participations::Column::TournamentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(participations::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(tournament_entries::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(tournaments::Entity).to_owned())
            .await?;

        Ok(())
    }
}
