use models::domains::{
    admins, notifications, organiser_banned_teams, organiser_followers, organiser_ratings,
    organisers, players, team_join_requests, teams,
};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(admins::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(admins::Column::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(admins::Column::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(admins::Column::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(admins::Column::Passhash).string().not_null())
                    .col(
                        ColumnDef::new(admins::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(organisers::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(organisers::Column::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(organisers::Column::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(organisers::Column::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(organisers::Column::Passhash)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(organisers::Column::TotalRevenue)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(organisers::Column::Rating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(organisers::Column::RatingCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(organisers::Column::ShowRevenue)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(organisers::Column::ShowFollowers)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(organisers::Column::Banned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(organisers::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(organisers::Column::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(teams::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(teams::Column::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(teams::Column::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(teams::Column::CaptainId).string().not_null())
                    .col(
                        ColumnDef::new(teams::Column::Banned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(teams::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(players::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(players::Column::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(players::Column::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(players::Column::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(players::Column::Passhash).string().not_null())
                    .col(ColumnDef::new(players::Column::TeamId).string().null())
                    .col(
                        ColumnDef::new(players::Column::Banned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(players::Column::TeamPaymentPaid)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(players::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(players::Column::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-players-team_id")
                            .from(players::Entity, players::Column::TeamId)
                            .to(teams::Entity, teams::Column::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(team_join_requests::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(team_join_requests::Column::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(team_join_requests::Column::TeamId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(team_join_requests::Column::PlayerId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(team_join_requests::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-team_join_requests-team_id")
                            .from(team_join_requests::Entity, team_join_requests::Column::TeamId)
                            .to(teams::Entity, teams::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-team_join_requests-player_id")
                            .from(
                                team_join_requests::Entity,
                                team_join_requests::Column::PlayerId,
                            )
                            .to(players::Entity, players::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-team_join_requests-team_player")
                    .table(team_join_requests::Entity)
                    .col(team_join_requests::Column::TeamId)
                    .col(team_join_requests::Column::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(organiser_followers::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(organiser_followers::Column::PlayerId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(organiser_followers::Column::OrganiserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(organiser_followers::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(organiser_followers::Column::PlayerId)
                            .col(organiser_followers::Column::OrganiserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-organiser_followers-player_id")
                            .from(
                                organiser_followers::Entity,
                                organiser_followers::Column::PlayerId,
                            )
                            .to(players::Entity, players::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-organiser_followers-organiser_id")
                            .from(
                                organiser_followers::Entity,
                                organiser_followers::Column::OrganiserId,
                            )
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
                    .table(organiser_banned_teams::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(organiser_banned_teams::Column::OrganiserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(organiser_banned_teams::Column::TeamId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(organiser_banned_teams::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(organiser_banned_teams::Column::OrganiserId)
                            .col(organiser_banned_teams::Column::TeamId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-organiser_banned_teams-organiser_id")
                            .from(
                                organiser_banned_teams::Entity,
                                organiser_banned_teams::Column::OrganiserId,
                            )
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
                    .table(organiser_ratings::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(organiser_ratings::Column::PlayerId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(organiser_ratings::Column::OrganiserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(organiser_ratings::Column::Stars)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(organiser_ratings::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(organiser_ratings::Column::PlayerId)
                            .col(organiser_ratings::Column::OrganiserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-organiser_ratings-organiser_id")
                            .from(
                                organiser_ratings::Entity,
                                organiser_ratings::Column::OrganiserId,
                            )
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
                    .table(notifications::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(notifications::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(notifications::Column::OrganiserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(notifications::Column::Message)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(notifications::Column::Read)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(notifications::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-notifications-organiser_id")
                            .from(notifications::Entity, notifications::Column::OrganiserId)
                            .to(organisers::Entity, organisers::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children before parents.
        manager
            .drop_table(Table::drop().table(notifications::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(organiser_ratings::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(organiser_banned_teams::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(organiser_followers::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(team_join_requests::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(players::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(teams::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(organisers::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(admins::Entity).to_owned())
            .await?;

        Ok(())
    }
}
