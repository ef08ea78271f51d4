use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbConn, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::info;

use models::domains::{organiser_followers, organisers, participations, players, teams, tournaments};
use models::params::{auth::RegisterParams, player::UpdatePlayerParams};
use models::queries::SearchQuery;
use models::schemas::player::{
    ParticipationSchema, PlayerProfileSchema, PlayerStats, PlayerSummarySchema,
};

use crate::cache::keys;
use crate::core::ranking::win_percentage;
use crate::error::{AppError, AppResult, unique_violation};
use crate::state::AppState;
use crate::utils::password::hash_password;

const SEARCH_LIMIT: u64 = 25;

pub async fn find_player<C: ConnectionTrait>(db: &C, id: &str) -> AppResult<players::Model> {
    players::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("Player not found"))
}

/// Rejects a username or email already held by another player.
async fn ensure_available(
    conn: &DbConn,
    username: Option<&str>,
    email: Option<&str>,
    except: Option<&str>,
) -> AppResult<()> {
    let mut base = players::Entity::find();
    if let Some(id) = except {
        base = base.filter(players::Column::Id.ne(id));
    }
    if let Some(username) = username {
        let taken = base
            .clone()
            .filter(players::Column::Username.eq(username))
            .count(conn)
            .await?;
        if taken > 0 {
            return Err(AppError::conflict("Username already exists"));
        }
    }
    if let Some(email) = email {
        let taken = base
            .filter(players::Column::Email.eq(email))
            .count(conn)
            .await?;
        if taken > 0 {
            return Err(AppError::conflict("Email already exists"));
        }
    }
    Ok(())
}

pub async fn register_player(state: &AppState, params: RegisterParams) -> AppResult<players::Model> {
    let email = params.email.to_lowercase();
    ensure_available(&state.conn, Some(&params.username), Some(&email), None).await?;

    let passhash = hash_password(&params.password, state.config.bcrypt_cost)?;
    let now = super::now();
    let player = players::ActiveModel {
        id: Set(super::new_id()),
        username: Set(params.username),
        email: Set(email),
        passhash: Set(passhash),
        team_id: Set(None),
        banned: Set(false),
        team_payment_paid: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.conn)
    .await
    .map_err(|e| unique_violation(e, "Username or email already exists"))?;

    info!(player_id = %player.id, "Player registered");
    Ok(player)
}

pub async fn update_player(
    state: &AppState,
    id: &str,
    params: UpdatePlayerParams,
) -> AppResult<players::Model> {
    let player = find_player(&state.conn, id).await?;
    let email = params.email.map(|e| e.to_lowercase());
    ensure_available(
        &state.conn,
        params.username.as_deref(),
        email.as_deref(),
        Some(id),
    )
    .await?;

    let old_username = player.username.clone();
    let mut active: players::ActiveModel = player.into();
    if let Some(username) = params.username {
        active.username = Set(username);
    }
    if let Some(email) = email {
        active.email = Set(email);
    }
    if let Some(password) = params.password {
        active.passhash = Set(hash_password(&password, state.config.bcrypt_cost)?);
    }
    active.updated_at = Set(super::now());
    let player = active
        .update(&state.conn)
        .await
        .map_err(|e| unique_violation(e, "Username or email already exists"))?;

    state
        .cache
        .delete(&[
            &keys::player_dashboard(id),
            &keys::player_profile(&old_username),
            &keys::player_profile(&player.username),
        ])
        .await;

    Ok(player)
}

pub async fn player_stats<C: ConnectionTrait>(db: &C, player_id: &str) -> AppResult<PlayerStats> {
    let base = participations::Entity::find()
        .filter(participations::Column::PlayerId.eq(player_id));
    let played = base.clone().count(db).await?;
    let won = base
        .filter(participations::Column::Won.eq(true))
        .count(db)
        .await?;

    Ok(PlayerStats {
        tournaments_played: played,
        tournaments_won: won,
        win_percentage: win_percentage(played, won),
    })
}

/// Most recent participations first.
pub async fn participation_history(
    conn: &DbConn,
    player_id: &str,
    limit: Option<u64>,
) -> AppResult<Vec<ParticipationSchema>> {
    let rows = participations::Entity::find()
        .filter(participations::Column::PlayerId.eq(player_id))
        .find_also_related(tournaments::Entity)
        .order_by_desc(participations::Column::CreatedAt)
        .limit(limit)
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(p, t)| ParticipationSchema {
            tournament_name: t.map(|t| t.name).unwrap_or_default(),
            tournament_id: p.tournament_id,
            team_id: p.team_id,
            won: p.won,
        })
        .collect())
}

pub async fn get_profile(state: &AppState, username: &str) -> AppResult<PlayerProfileSchema> {
    let key = keys::player_profile(username);
    if let Some(profile) = state.cache.get_json(&key).await {
        return Ok(profile);
    }

    let player = players::Entity::find()
        .filter(players::Column::Username.eq(username))
        .one(&state.conn)
        .await?
        .ok_or_else(|| AppError::not_found("Player not found"))?;

    let team_name = match &player.team_id {
        Some(team_id) => teams::Entity::find_by_id(team_id.as_str())
            .one(&state.conn)
            .await?
            .map(|t| t.name),
        None => None,
    };
    let stats = player_stats(&state.conn, &player.id).await?;

    let profile = PlayerProfileSchema {
        id: player.id,
        username: player.username,
        team_name,
        tournaments_played: stats.tournaments_played,
        tournaments_won: stats.tournaments_won,
        win_percentage: stats.win_percentage,
    };
    state.cache.set_json(&key, &profile).await;
    Ok(profile)
}

pub async fn search_players(conn: &DbConn, query: SearchQuery) -> AppResult<Vec<PlayerSummarySchema>> {
    let rows = players::Entity::find()
        .filter(players::Column::Username.contains(query.username.trim()))
        .filter(players::Column::Banned.eq(false))
        .order_by_asc(players::Column::Username)
        .limit(SEARCH_LIMIT)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(From::from).collect())
}

pub async fn follow_organiser(state: &AppState, player_id: &str, organiser_id: &str) -> AppResult<()> {
    organisers::Entity::find_by_id(organiser_id)
        .one(&state.conn)
        .await?
        .ok_or_else(|| AppError::not_found("Organiser not found"))?;

    organiser_followers::ActiveModel {
        player_id: Set(player_id.to_owned()),
        organiser_id: Set(organiser_id.to_owned()),
        created_at: Set(super::now()),
    }
    .insert(&state.conn)
    .await
    .map_err(|e| unique_violation(e, "Already following this organiser"))?;

    state
        .cache
        .delete(&[&keys::player_dashboard(player_id), &keys::organiser_dashboard(organiser_id)])
        .await;
    Ok(())
}

pub async fn unfollow_organiser(state: &AppState, player_id: &str, organiser_id: &str) -> AppResult<()> {
    let res = organiser_followers::Entity::delete_many()
        .filter(
            Condition::all()
                .add(organiser_followers::Column::PlayerId.eq(player_id))
                .add(organiser_followers::Column::OrganiserId.eq(organiser_id)),
        )
        .exec(&state.conn)
        .await?;
    if res.rows_affected == 0 {
        return Err(AppError::not_found("Not following this organiser"));
    }

    state
        .cache
        .delete(&[&keys::player_dashboard(player_id), &keys::organiser_dashboard(organiser_id)])
        .await;
    Ok(())
}

/// Usernames of the organisers the player follows.
pub async fn following(conn: &DbConn, player_id: &str) -> AppResult<Vec<String>> {
    let rows = organiser_followers::Entity::find()
        .filter(organiser_followers::Column::PlayerId.eq(player_id))
        .find_also_related(organisers::Entity)
        .order_by_asc(organiser_followers::Column::CreatedAt)
        .all(conn)
        .await?;
    Ok(rows
        .into_iter()
        .filter_map(|(_, o)| o.map(|o| o.username))
        .collect())
}
