use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbConn, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait, sea_query::Expr,
};
use tracing::info;

use models::domains::{
    ban_history, organisers, players, reports,
    sea_orm_active_enums::{BannedEntity, ReportStatus},
    teams,
};
use models::params::moderation::CreateReportParams;
use models::queries::ReportQuery;
use models::schemas::moderation::{BanHistorySchema, ReportSchema};

use crate::error::{AppError, AppResult};

fn label(entity: BannedEntity) -> &'static str {
    match entity {
        BannedEntity::Player => "Player",
        BannedEntity::Team => "Team",
        BannedEntity::Organiser => "Organiser",
    }
}

/// Current ban flag of the entity, or NotFound.
async fn banned_flag<C: ConnectionTrait>(db: &C, entity: BannedEntity, id: &str) -> AppResult<bool> {
    let flag = match entity {
        BannedEntity::Player => players::Entity::find_by_id(id).one(db).await?.map(|p| p.banned),
        BannedEntity::Team => teams::Entity::find_by_id(id).one(db).await?.map(|t| t.banned),
        BannedEntity::Organiser => organisers::Entity::find_by_id(id)
            .one(db)
            .await?
            .map(|o| o.banned),
    };
    flag.ok_or_else(|| AppError::not_found(format!("{} not found", label(entity))))
}

async fn set_banned_flag<C: ConnectionTrait>(
    db: &C,
    entity: BannedEntity,
    id: &str,
    banned: bool,
) -> AppResult<()> {
    match entity {
        BannedEntity::Player => {
            players::Entity::update_many()
                .col_expr(players::Column::Banned, Expr::value(banned))
                .filter(players::Column::Id.eq(id))
                .exec(db)
                .await?;
        }
        BannedEntity::Team => {
            teams::Entity::update_many()
                .col_expr(teams::Column::Banned, Expr::value(banned))
                .filter(teams::Column::Id.eq(id))
                .exec(db)
                .await?;
        }
        BannedEntity::Organiser => {
            organisers::Entity::update_many()
                .col_expr(organisers::Column::Banned, Expr::value(banned))
                .filter(organisers::Column::Id.eq(id))
                .exec(db)
                .await?;
        }
    }
    Ok(())
}

/// Bans the entity and opens an audit record. An entity carries at most one
/// active ban, so banning twice is a conflict.
pub async fn ban(
    conn: &DbConn,
    entity: BannedEntity,
    id: &str,
    reason: &str,
) -> AppResult<BanHistorySchema> {
    let txn = conn.begin().await?;

    if banned_flag(&txn, entity, id).await? {
        return Err(AppError::conflict(format!(
            "{} is already banned",
            label(entity)
        )));
    }
    set_banned_flag(&txn, entity, id, true).await?;

    let record = ban_history::ActiveModel {
        entity_id: Set(id.to_owned()),
        entity_type: Set(entity),
        reason: Set(reason.to_owned()),
        active: Set(true),
        created_at: Set(super::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!(entity = label(entity), id, "Ban issued");
    Ok(record.into())
}

/// Lifts the ban and closes the active audit record. Unbanning an entity that
/// is not banned succeeds without writing anything.
pub async fn unban(conn: &DbConn, entity: BannedEntity, id: &str) -> AppResult<()> {
    let txn = conn.begin().await?;

    if !banned_flag(&txn, entity, id).await? {
        return Ok(());
    }
    set_banned_flag(&txn, entity, id, false).await?;
    ban_history::Entity::update_many()
        .col_expr(ban_history::Column::Active, Expr::value(false))
        .filter(ban_history::Column::EntityId.eq(id))
        .filter(ban_history::Column::EntityType.eq(entity))
        .filter(ban_history::Column::Active.eq(true))
        .exec(&txn)
        .await?;

    txn.commit().await?;
    info!(entity = label(entity), id, "Ban lifted");
    Ok(())
}

pub async fn ban_history(conn: &DbConn, entity_id: &str) -> AppResult<Vec<BanHistorySchema>> {
    let rows = ban_history::Entity::find()
        .filter(ban_history::Column::EntityId.eq(entity_id))
        .order_by_desc(ban_history::Column::CreatedAt)
        .order_by_desc(ban_history::Column::Id)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(From::from).collect())
}

pub async fn create_report(
    conn: &DbConn,
    reporter_id: &str,
    params: CreateReportParams,
) -> AppResult<ReportSchema> {
    match (&params.team_id, &params.organiser_id) {
        (Some(team_id), None) => {
            banned_flag(conn, BannedEntity::Team, team_id).await?;
        }
        (None, Some(organiser_id)) => {
            banned_flag(conn, BannedEntity::Organiser, organiser_id).await?;
        }
        _ => {
            return Err(AppError::bad_request(
                "Report exactly one team or organiser",
            ));
        }
    }

    let report = reports::ActiveModel {
        reporter_id: Set(reporter_id.to_owned()),
        reported_team_id: Set(params.team_id),
        reported_organiser_id: Set(params.organiser_id),
        reason: Set(params.reason),
        status: Set(ReportStatus::Pending),
        created_at: Set(super::now()),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    info!(report_id = report.id, reporter_id, "Report filed");
    Ok(report.into())
}

pub async fn list_reports(conn: &DbConn, query: ReportQuery) -> AppResult<Vec<ReportSchema>> {
    let mut select = reports::Entity::find();
    if let Some(status) = query.status {
        select = select.filter(reports::Column::Status.eq(status));
    }
    let rows = select
        .order_by_desc(reports::Column::CreatedAt)
        .order_by_desc(reports::Column::Id)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(From::from).collect())
}

/// Marks the report as handled. No action is taken against the target.
pub async fn review_report(conn: &DbConn, id: i32) -> AppResult<ReportSchema> {
    let report = reports::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::not_found("Report not found"))?;

    let mut active: reports::ActiveModel = report.into();
    active.status = Set(ReportStatus::Reviewed);
    Ok(active.update(conn).await?.into())
}
