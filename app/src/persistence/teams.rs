use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbConn, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use models::domains::{
    players, sea_orm_active_enums::TournamentStatus, team_join_requests, teams, tournament_entries,
    tournaments,
};
use models::params::team::CreateTeamParams;
use models::schemas::team::{JoinRequestSchema, MemberSchema, TeamSchema};

use super::players::find_player;
use crate::cache::keys;
use crate::error::{AppError, AppResult, unique_violation};
use crate::state::AppState;

pub async fn find_team<C: ConnectionTrait>(db: &C, id: &str) -> AppResult<teams::Model> {
    teams::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Team not found"))
}

fn ensure_captain(team: &teams::Model, player_id: &str) -> AppResult<()> {
    if team.captain_id != player_id {
        return Err(AppError::forbidden("Only the team captain can do this"));
    }
    Ok(())
}

/// Founds a team with the caller as captain. When a creation fee is configured
/// the caller's paid flag is required and consumed.
pub async fn create_team(
    state: &AppState,
    player_id: &str,
    params: CreateTeamParams,
) -> AppResult<teams::Model> {
    let name = params.name.trim().to_owned();
    let txn = state.conn.begin().await?;

    let player = find_player(&txn, player_id).await?;
    let taken = teams::Entity::find()
        .filter(teams::Column::Name.eq(name.as_str()))
        .count(&txn)
        .await?;
    if taken > 0 {
        return Err(AppError::conflict("Team name already exists"));
    }
    if player.team_id.is_some() {
        return Err(AppError::bad_request("Player already belongs to a team"));
    }
    let fee_required = state.config.team_creation_fee.is_some();
    if fee_required && !player.team_payment_paid {
        return Err(AppError::forbidden(
            "Team creation fee must be paid before creating a team",
        ));
    }

    let team = teams::ActiveModel {
        id: Set(super::new_id()),
        name: Set(name),
        captain_id: Set(player.id.clone()),
        banned: Set(false),
        created_at: Set(super::now()),
    }
    .insert(&txn)
    .await
    .map_err(|e| unique_violation(e, "Team name already exists"))?;

    let mut active: players::ActiveModel = player.into();
    active.team_id = Set(Some(team.id.clone()));
    if fee_required {
        active.team_payment_paid = Set(false);
    }
    active.updated_at = Set(super::now());
    active.update(&txn).await?;

    team_join_requests::Entity::delete_many()
        .filter(team_join_requests::Column::PlayerId.eq(player_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    state.cache.delete(&[&keys::player_dashboard(player_id)]).await;
    info!(team_id = %team.id, captain_id = %player_id, "Team created");
    Ok(team)
}

pub async fn get_team(conn: &DbConn, id: &str) -> AppResult<TeamSchema> {
    let team = find_team(conn, id).await?;

    let players = players::Entity::find()
        .filter(players::Column::TeamId.eq(id))
        .order_by_asc(players::Column::Username)
        .all(conn)
        .await?
        .into_iter()
        .map(|p| MemberSchema {
            captain: p.id == team.captain_id,
            id: p.id,
            username: p.username,
        })
        .collect();
    let tournaments = tournament_entries::Entity::find()
        .filter(tournament_entries::Column::TeamId.eq(id))
        .order_by_desc(tournament_entries::Column::RegisteredAt)
        .all(conn)
        .await?
        .into_iter()
        .map(|e| e.tournament_id)
        .collect();

    Ok(TeamSchema {
        id: team.id,
        name: team.name,
        captain_id: team.captain_id,
        banned: team.banned,
        created_at: team.created_at.to_utc(),
        players,
        tournaments,
    })
}

/// Files a request to join `team_id`. Membership is only granted when the
/// captain accepts it.
pub async fn request_to_join_team(
    conn: &DbConn,
    team_id: &str,
    player_id: &str,
) -> AppResult<JoinRequestSchema> {
    let player = find_player(conn, player_id).await?;
    if player.team_id.is_some() {
        return Err(AppError::bad_request("Player already belongs to a team"));
    }
    let team = find_team(conn, team_id).await?;
    if team.banned {
        return Err(AppError::forbidden("Team is banned"));
    }

    let request = team_join_requests::ActiveModel {
        id: Set(super::new_id()),
        team_id: Set(team.id),
        player_id: Set(player.id),
        created_at: Set(super::now()),
    }
    .insert(conn)
    .await
    .map_err(|e| unique_violation(e, "Join request already sent"))?;

    Ok(request.into())
}

/// Same admission path as [`request_to_join_team`].
pub async fn join_team(conn: &DbConn, team_id: &str, player_id: &str) -> AppResult<JoinRequestSchema> {
    request_to_join_team(conn, team_id, player_id).await
}

pub async fn list_join_requests(
    conn: &DbConn,
    team_id: &str,
    captain_id: &str,
) -> AppResult<Vec<JoinRequestSchema>> {
    let team = find_team(conn, team_id).await?;
    ensure_captain(&team, captain_id)?;

    let rows = team_join_requests::Entity::find()
        .filter(team_join_requests::Column::TeamId.eq(team_id))
        .order_by_asc(team_join_requests::Column::CreatedAt)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(From::from).collect())
}

async fn find_request<C: ConnectionTrait>(
    db: &C,
    request_id: &str,
) -> AppResult<team_join_requests::Model> {
    team_join_requests::Entity::find_by_id(request_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Join request not found"))
}

pub async fn accept_join_request(
    state: &AppState,
    request_id: &str,
    captain_id: &str,
) -> AppResult<TeamSchema> {
    let txn = state.conn.begin().await?;

    let request = find_request(&txn, request_id).await?;
    let team = find_team(&txn, &request.team_id).await?;
    ensure_captain(&team, captain_id)?;

    let player = find_player(&txn, &request.player_id).await?;
    if player.team_id.is_some() {
        return Err(AppError::bad_request("Player already belongs to a team"));
    }

    let mut active: players::ActiveModel = player.into();
    active.team_id = Set(Some(team.id.clone()));
    active.updated_at = Set(super::now());
    active.update(&txn).await?;

    // The player is placed now; their other pending requests are void.
    team_join_requests::Entity::delete_many()
        .filter(team_join_requests::Column::PlayerId.eq(request.player_id.as_str()))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    state
        .cache
        .delete(&[&keys::player_dashboard(&request.player_id)])
        .await;
    info!(team_id = %team.id, player_id = %request.player_id, "Join request accepted");
    get_team(&state.conn, &team.id).await
}

pub async fn reject_join_request(conn: &DbConn, request_id: &str, captain_id: &str) -> AppResult<()> {
    let request = find_request(conn, request_id).await?;
    let team = find_team(conn, &request.team_id).await?;
    ensure_captain(&team, captain_id)?;

    team_join_requests::Entity::delete_by_id(request.id)
        .exec(conn)
        .await?;
    Ok(())
}

/// Removes the player from their team. A captain must hand over captaincy
/// first unless they are the last member, in which case the team is disbanded.
///
/// Returns whether the team was disbanded.
pub async fn leave_team(state: &AppState, player_id: &str) -> AppResult<bool> {
    let txn = state.conn.begin().await?;

    let player = find_player(&txn, player_id).await?;
    let team_id = player
        .team_id
        .clone()
        .ok_or_else(|| AppError::bad_request("Player is not in a team"))?;
    let team = find_team(&txn, &team_id).await?;

    let mut disband = false;
    if team.captain_id == player_id {
        let members = players::Entity::find()
            .filter(players::Column::TeamId.eq(team_id.as_str()))
            .count(&txn)
            .await?;
        if members > 1 {
            return Err(AppError::bad_request(
                "Transfer captaincy before leaving the team",
            ));
        }
        if has_open_entries(&txn, &team_id).await? {
            return Err(AppError::bad_request(
                "Withdraw the team from its open tournaments before disbanding it",
            ));
        }
        disband = true;
    }

    let mut active: players::ActiveModel = player.into();
    active.team_id = Set(None);
    active.updated_at = Set(super::now());
    active.update(&txn).await?;

    if disband {
        team_join_requests::Entity::delete_many()
            .filter(team_join_requests::Column::TeamId.eq(team_id.as_str()))
            .exec(&txn)
            .await?;
        teams::Entity::delete_by_id(team_id.as_str())
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;

    state.cache.delete(&[&keys::player_dashboard(player_id)]).await;
    if disband {
        info!(team_id, "Team disbanded");
    }
    Ok(disband)
}

/// Whether the team holds an entry in a tournament that is not yet completed.
async fn has_open_entries<C: ConnectionTrait>(db: &C, team_id: &str) -> AppResult<bool> {
    let open = tournament_entries::Entity::find()
        .inner_join(tournaments::Entity)
        .filter(tournament_entries::Column::TeamId.eq(team_id))
        .filter(tournaments::Column::Status.ne(TournamentStatus::Completed))
        .count(db)
        .await?;
    Ok(open > 0)
}

pub async fn transfer_captaincy(
    conn: &DbConn,
    team_id: &str,
    captain_id: &str,
    new_captain_id: &str,
) -> AppResult<teams::Model> {
    let txn = conn.begin().await?;

    let team = find_team(&txn, team_id).await?;
    ensure_captain(&team, captain_id)?;

    let new_captain = find_player(&txn, new_captain_id).await?;
    if new_captain.team_id.as_deref() != Some(team_id) {
        return Err(AppError::bad_request("New captain must be a team member"));
    }

    let mut active: teams::ActiveModel = team.into();
    active.captain_id = Set(new_captain.id);
    let team = active.update(&txn).await?;
    txn.commit().await?;

    info!(team_id, captain_id = %team.captain_id, "Captaincy transferred");
    Ok(team)
}
