use models::domains::{ban_history, payments, players, reports};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(payments::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(payments::Column::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(payments::Column::PlayerId).string().not_null())
                    .col(
                        ColumnDef::new(payments::Column::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(payments::Column::Currency)
                            .string_len(8)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(payments::Column::PaymentType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(payments::Column::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(payments::Column::GatewayPaymentId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(payments::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(payments::Column::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-payments-player_id")
                            .from(payments::Entity, payments::Column::PlayerId)
                            .to(players::Entity, players::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(reports::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(reports::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(reports::Column::ReporterId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(reports::Column::ReportedTeamId).string().null())
                    .col(
                        ColumnDef::new(reports::Column::ReportedOrganiserId)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(reports::Column::Reason).text().not_null())
                    .col(
                        ColumnDef::new(reports::Column::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(reports::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reports-reporter_id")
                            .from(reports::Entity, reports::Column::ReporterId)
                            .to(players::Entity, players::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ban_history::Entity)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ban_history::Column::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ban_history::Column::EntityId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ban_history::Column::EntityType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ban_history::Column::Reason).text().not_null())
                    .col(
                        ColumnDef::new(ban_history::Column::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ban_history::Column::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-ban_history-entity")
                    .table(ban_history::Entity)
                    .col(ban_history::Column::EntityId)
                    .col(ban_history::Column::Active)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ban_history::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(reports::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(payments::Entity).to_owned())
            .await?;

        Ok(())
    }
}
