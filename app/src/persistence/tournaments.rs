use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbConn, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait, sea_query::Expr,
};
use tracing::info;

use models::domains::{
    organiser_banned_teams, organisers, participations, players, sea_orm_active_enums::TournamentStatus,
    teams, tournament_entries, tournaments,
};
use models::params::tournament::{CreateTournamentParams, UpdatePointsParams};
use models::queries::TournamentQuery;
use models::schemas::pagination::PaginatedData;
use models::schemas::tournament::{PointsEntrySchema, TournamentDetailSchema, TournamentSchema};

use super::notifications::notify;
use crate::core::points;
use crate::error::{AppError, AppResult, unique_violation};

pub async fn find_tournament<C: ConnectionTrait>(db: &C, id: &str) -> AppResult<tournaments::Model> {
    tournaments::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Tournament not found"))
}

/// Loads a tournament owned by `organiser_id`.
async fn find_owned<C: ConnectionTrait>(
    db: &C,
    id: &str,
    organiser_id: &str,
) -> AppResult<tournaments::Model> {
    let tournament = find_tournament(db, id).await?;
    if tournament.organiser_id != organiser_id {
        return Err(AppError::forbidden(
            "Only the tournament organiser can manage this tournament",
        ));
    }
    Ok(tournament)
}

async fn entries_of<C: ConnectionTrait>(
    db: &C,
    tournament_id: &str,
) -> AppResult<Vec<tournament_entries::Model>> {
    Ok(tournament_entries::Entity::find()
        .filter(tournament_entries::Column::TournamentId.eq(tournament_id))
        .order_by_asc(tournament_entries::Column::Ranking)
        .all(db)
        .await?)
}

/// Re-sorts the table and persists the rankings that moved.
async fn rerank_entries<C: ConnectionTrait>(
    db: &C,
    tournament_id: &str,
) -> AppResult<Vec<tournament_entries::Model>> {
    let mut entries = entries_of(db, tournament_id).await?;
    for (id, ranking) in points::rerank(&mut entries) {
        tournament_entries::Entity::update_many()
            .col_expr(tournament_entries::Column::Ranking, Expr::value(ranking))
            .filter(tournament_entries::Column::Id.eq(id))
            .exec(db)
            .await?;
    }
    Ok(entries)
}

/// Adds `delta` to the tournament's revenue and its organiser's total, SQL side.
async fn accrue_revenue<C: ConnectionTrait>(
    db: &C,
    tournament: &tournaments::Model,
    delta: i64,
) -> AppResult<()> {
    if delta == 0 {
        return Ok(());
    }
    tournaments::Entity::update_many()
        .col_expr(
            tournaments::Column::Revenue,
            Expr::col(tournaments::Column::Revenue).add(delta),
        )
        .col_expr(tournaments::Column::UpdatedAt, Expr::value(super::now()))
        .filter(tournaments::Column::Id.eq(tournament.id.as_str()))
        .exec(db)
        .await?;
    organisers::Entity::update_many()
        .col_expr(
            organisers::Column::TotalRevenue,
            Expr::col(organisers::Column::TotalRevenue).add(delta),
        )
        .filter(organisers::Column::Id.eq(tournament.organiser_id.as_str()))
        .exec(db)
        .await?;
    Ok(())
}

pub async fn create_tournament(
    conn: &DbConn,
    organiser_id: &str,
    params: CreateTournamentParams,
) -> AppResult<tournaments::Model> {
    let exists = tournaments::Entity::find()
        .filter(tournaments::Column::Tid.eq(params.tid.as_str()))
        .count(conn)
        .await?;
    if exists > 0 {
        return Err(AppError::conflict("Tournament with this tid already exists"));
    }

    let now = super::now();
    let tournament = tournaments::ActiveModel {
        id: Set(super::new_id()),
        tid: Set(params.tid),
        name: Set(params.name),
        description: Set(params.description),
        start_date: Set(params.start_date),
        end_date: Set(params.end_date),
        entry_fee: Set(params.entry_fee),
        prize_pool: Set(params.prize_pool),
        status: Set(TournamentStatus::Pending),
        organiser_id: Set(organiser_id.to_owned()),
        winner_team_id: Set(None),
        revenue: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(|e| unique_violation(e, "Tournament with this tid already exists"))?;

    info!(tournament_id = %tournament.id, tid = %tournament.tid, "Tournament created");
    Ok(tournament)
}

pub async fn get_tournament(conn: &DbConn, id: &str) -> AppResult<TournamentDetailSchema> {
    let tournament = find_tournament(conn, id).await?;
    let points_table = entries_of(conn, id).await?;
    Ok(TournamentDetailSchema {
        tournament: tournament.into(),
        points_table: points_table.into_iter().map(From::from).collect(),
    })
}

pub async fn list_tournaments(
    conn: &DbConn,
    query: TournamentQuery,
) -> AppResult<PaginatedData<TournamentSchema>> {
    let pagination = query.pagination();
    let (page, limit) = (pagination.page(), pagination.limit());

    let mut select = tournaments::Entity::find();
    if let Some(status) = query.status {
        select = select.filter(tournaments::Column::Status.eq(status));
    }
    let paginator = select
        .order_by_asc(tournaments::Column::StartDate)
        .order_by_asc(tournaments::Column::Id)
        .paginate(conn, limit);

    let total = paginator.num_items().await?;
    let data = paginator
        .fetch_page(page - 1)
        .await?
        .into_iter()
        .map(From::from)
        .collect();

    Ok(PaginatedData::new(data, page, limit, total))
}

pub async fn organiser_tournaments(
    conn: &DbConn,
    organiser_id: &str,
) -> AppResult<Vec<TournamentSchema>> {
    let rows = tournaments::Entity::find()
        .filter(tournaments::Column::OrganiserId.eq(organiser_id))
        .order_by_desc(tournaments::Column::CreatedAt)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(From::from).collect())
}

/// Approved tournaments that have not started yet, soonest first.
pub async fn upcoming_tournaments(conn: &DbConn, limit: u64) -> AppResult<Vec<TournamentSchema>> {
    let rows = tournaments::Entity::find()
        .filter(tournaments::Column::Status.eq(TournamentStatus::Approved))
        .filter(tournaments::Column::StartDate.gt(Utc::now().fixed_offset()))
        .order_by_asc(tournaments::Column::StartDate)
        .limit(limit)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(From::from).collect())
}

pub async fn points_table(conn: &DbConn, id: &str) -> AppResult<Vec<PointsEntrySchema>> {
    find_tournament(conn, id).await?;
    Ok(entries_of(conn, id)
        .await?
        .into_iter()
        .map(From::from)
        .collect())
}

pub async fn approve_tournament(conn: &DbConn, id: &str) -> AppResult<tournaments::Model> {
    let txn = conn.begin().await?;

    let tournament = find_tournament(&txn, id).await?;
    if tournament.status != TournamentStatus::Pending {
        return Err(AppError::bad_request(
            "Only pending tournaments can be approved",
        ));
    }

    let mut active: tournaments::ActiveModel = tournament.into();
    active.status = Set(TournamentStatus::Approved);
    active.updated_at = Set(super::now());
    let tournament = active.update(&txn).await?;

    notify(
        &txn,
        &tournament.organiser_id,
        format!("Your tournament \"{}\" has been approved", tournament.name),
    )
    .await?;

    txn.commit().await?;
    info!(tournament_id = %tournament.id, "Tournament approved");
    Ok(tournament)
}

/// Deletes a pending tournament and tells its organiser why.
pub async fn reject_tournament(conn: &DbConn, id: &str, reason: &str) -> AppResult<()> {
    let txn = conn.begin().await?;

    let tournament = find_tournament(&txn, id).await?;
    if tournament.status != TournamentStatus::Pending {
        return Err(AppError::bad_request(
            "Only pending tournaments can be rejected",
        ));
    }

    tournaments::Entity::delete_by_id(tournament.id.as_str())
        .exec(&txn)
        .await?;
    notify(
        &txn,
        &tournament.organiser_id,
        format!(
            "Your tournament \"{}\" has been rejected. Reason: {}",
            tournament.name, reason
        ),
    )
    .await?;

    txn.commit().await?;
    info!(tournament_id = %tournament.id, "Tournament rejected");
    Ok(())
}

/// Registers the player's team. Every check and write happens in one transaction,
/// so a failed join leaves no trace.
pub async fn join_tournament(
    conn: &DbConn,
    tournament_id: &str,
    player_id: &str,
) -> AppResult<tournaments::Model> {
    let txn = conn.begin().await?;

    let player = super::players::find_player(&txn, player_id).await?;
    let team_id = player
        .team_id
        .ok_or_else(|| AppError::bad_request("Player must be part of a team"))?;

    let tournament = find_tournament(&txn, tournament_id).await?;
    if tournament.status != TournamentStatus::Approved {
        return Err(AppError::bad_request(
            "Tournament is not open for registration",
        ));
    }

    let team = teams::Entity::find_by_id(team_id.as_str())
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Team not found"))?;
    if team.banned {
        return Err(AppError::forbidden("Team is banned"));
    }
    let organiser_ban = organiser_banned_teams::Entity::find_by_id((
        tournament.organiser_id.clone(),
        team.id.clone(),
    ))
    .one(&txn)
    .await?;
    if organiser_ban.is_some() {
        return Err(AppError::forbidden("Team is banned by this organiser"));
    }

    let registered = tournament_entries::Entity::find()
        .filter(tournament_entries::Column::TournamentId.eq(tournament_id))
        .count(&txn)
        .await?;
    let already = tournament_entries::Entity::find()
        .filter(tournament_entries::Column::TournamentId.eq(tournament_id))
        .filter(tournament_entries::Column::TeamId.eq(team.id.as_str()))
        .count(&txn)
        .await?;
    if already > 0 {
        return Err(AppError::conflict(
            "Team already registered for this tournament",
        ));
    }

    tournament_entries::ActiveModel {
        tournament_id: Set(tournament.id.clone()),
        team_id: Set(team.id.clone()),
        team_name: Set(team.name.clone()),
        points: Set(0),
        ranking: Set(registered as i32 + 1),
        registered_at: Set(super::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| unique_violation(e, "Team already registered for this tournament"))?;
    rerank_entries(&txn, tournament_id).await?;

    accrue_revenue(&txn, &tournament, tournament.entry_fee).await?;

    let roster: Vec<String> = players::Entity::find()
        .filter(players::Column::TeamId.eq(team.id.as_str()))
        .all(&txn)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    let recorded: HashSet<String> = participations::Entity::find()
        .filter(participations::Column::TournamentId.eq(tournament_id))
        .filter(participations::Column::PlayerId.is_in(roster.clone()))
        .all(&txn)
        .await?
        .into_iter()
        .map(|p| p.player_id)
        .collect();
    let now = super::now();
    for member in roster.into_iter().filter(|id| !recorded.contains(id)) {
        participations::ActiveModel {
            player_id: Set(member),
            tournament_id: Set(tournament.id.clone()),
            team_id: Set(team.id.clone()),
            won: Set(false),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    let tournament = find_tournament(&txn, tournament_id).await?;
    txn.commit().await?;

    info!(tournament_id, team_id = %team.id, "Team joined tournament");
    Ok(tournament)
}

/// Withdraws the captain's team, reversing its entry fee.
pub async fn leave_tournament(
    conn: &DbConn,
    tournament_id: &str,
    player_id: &str,
) -> AppResult<tournaments::Model> {
    let txn = conn.begin().await?;

    let player = super::players::find_player(&txn, player_id).await?;
    let team_id = player
        .team_id
        .ok_or_else(|| AppError::bad_request("Player must be part of a team"))?;
    let team = teams::Entity::find_by_id(team_id.as_str())
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Team not found"))?;
    if team.captain_id != player_id {
        return Err(AppError::forbidden(
            "Only the team captain can withdraw the team",
        ));
    }

    let tournament = find_tournament(&txn, tournament_id).await?;
    if tournament.status == TournamentStatus::Completed {
        return Err(AppError::bad_request("Cannot leave a completed tournament"));
    }

    let removed = tournament_entries::Entity::delete_many()
        .filter(tournament_entries::Column::TournamentId.eq(tournament_id))
        .filter(tournament_entries::Column::TeamId.eq(team.id.as_str()))
        .exec(&txn)
        .await?;
    if removed.rows_affected == 0 {
        return Err(AppError::not_found(
            "Team is not registered for this tournament",
        ));
    }
    rerank_entries(&txn, tournament_id).await?;

    participations::Entity::delete_many()
        .filter(participations::Column::TournamentId.eq(tournament_id))
        .filter(participations::Column::TeamId.eq(team.id.as_str()))
        .exec(&txn)
        .await?;

    accrue_revenue(&txn, &tournament, -tournament.entry_fee).await?;

    let tournament = find_tournament(&txn, tournament_id).await?;
    txn.commit().await?;

    info!(tournament_id, team_id = %team.id, "Team left tournament");
    Ok(tournament)
}

pub async fn update_points_table(
    conn: &DbConn,
    tournament_id: &str,
    organiser_id: &str,
    params: UpdatePointsParams,
) -> AppResult<Vec<PointsEntrySchema>> {
    let txn = conn.begin().await?;

    let tournament = find_owned(&txn, tournament_id, organiser_id).await?;
    if tournament.status == TournamentStatus::Completed {
        return Err(AppError::bad_request("Tournament is already completed"));
    }

    let entry = tournament_entries::Entity::find()
        .filter(tournament_entries::Column::TournamentId.eq(tournament_id))
        .filter(tournament_entries::Column::TeamName.eq(params.team_name.as_str()))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found("Team not found in points table"))?;
    if entry.points.checked_add(params.additional_points).is_none() {
        return Err(AppError::bad_request("Points total is out of range"));
    }

    tournament_entries::Entity::update_many()
        .col_expr(
            tournament_entries::Column::Points,
            Expr::col(tournament_entries::Column::Points).add(params.additional_points),
        )
        .filter(tournament_entries::Column::Id.eq(entry.id))
        .exec(&txn)
        .await?;

    let entries = rerank_entries(&txn, tournament_id).await?;
    txn.commit().await?;

    Ok(entries.into_iter().map(From::from).collect())
}

/// Closes the tournament with `team_id` as winner. The team must hold the top
/// point total.
pub async fn update_winner(
    conn: &DbConn,
    tournament_id: &str,
    organiser_id: &str,
    team_id: &str,
) -> AppResult<tournaments::Model> {
    let txn = conn.begin().await?;

    let tournament = find_owned(&txn, tournament_id, organiser_id).await?;
    if tournament.status != TournamentStatus::Approved {
        return Err(AppError::bad_request(
            "Only approved tournaments can be completed",
        ));
    }

    let entries = entries_of(&txn, tournament_id).await?;
    if !entries.iter().any(|e| e.team_id == team_id) {
        return Err(AppError::bad_request(
            "Team is not registered for this tournament",
        ));
    }
    if !points::is_leader(&entries, team_id) {
        return Err(AppError::bad_request(
            "Winner must hold the top score in the points table",
        ));
    }

    let mut active: tournaments::ActiveModel = tournament.into();
    active.status = Set(TournamentStatus::Completed);
    active.winner_team_id = Set(Some(team_id.to_owned()));
    active.updated_at = Set(super::now());
    let tournament = active.update(&txn).await?;

    participations::Entity::update_many()
        .col_expr(participations::Column::Won, Expr::value(true))
        .filter(participations::Column::TournamentId.eq(tournament_id))
        .filter(participations::Column::TeamId.eq(team_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;
    info!(tournament_id, team_id, "Tournament completed");
    Ok(tournament)
}
