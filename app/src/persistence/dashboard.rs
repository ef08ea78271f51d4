use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use models::domains::{notifications, sea_orm_active_enums::TournamentStatus, teams, tournaments};
use models::schemas::{
    organiser::OrganiserDashboardSchema, player::PlayerDashboardSchema, team::TeamSummarySchema,
};

use super::{analytics, organisers, players};
use crate::cache::keys;
use crate::core::ranking::rank_of;
use crate::error::AppResult;
use crate::state::AppState;

const RECENT_TOURNAMENTS: u64 = 5;

/// Aggregated view of a player's standing. Served from cache for up to the
/// configured TTL, so rankings can trail recent results.
pub async fn player_dashboard(state: &AppState, player_id: &str) -> AppResult<PlayerDashboardSchema> {
    let key = keys::player_dashboard(player_id);
    if let Some(dashboard) = state.cache.get_json(&key).await {
        return Ok(dashboard);
    }

    let player = players::find_player(&state.conn, player_id).await?;
    let stats = players::player_stats(&state.conn, player_id).await?;
    let team = match &player.team_id {
        Some(team_id) => teams::Entity::find_by_id(team_id.as_str())
            .one(&state.conn)
            .await?
            .map(TeamSummarySchema::from),
        None => None,
    };

    let ranked = analytics::ranked_records(&state.conn).await?;
    let total_players = ranked.len() as u64;
    // Banned players are left out of the ranking; they sit behind everyone.
    let global_rank = rank_of(&ranked, player_id).unwrap_or(total_players + 1);

    let dashboard = PlayerDashboardSchema {
        id: player.id,
        username: player.username,
        email: player.email,
        team,
        tournaments_played: stats.tournaments_played,
        tournaments_won: stats.tournaments_won,
        win_percentage: stats.win_percentage,
        global_rank,
        total_players,
        following: players::following(&state.conn, player_id).await?,
        recent_tournaments: players::participation_history(
            &state.conn,
            player_id,
            Some(RECENT_TOURNAMENTS),
        )
        .await?,
    };
    state.cache.set_json(&key, &dashboard).await;
    Ok(dashboard)
}

pub async fn organiser_dashboard(
    state: &AppState,
    organiser_id: &str,
) -> AppResult<OrganiserDashboardSchema> {
    let key = keys::organiser_dashboard(organiser_id);
    if let Some(dashboard) = state.cache.get_json(&key).await {
        return Ok(dashboard);
    }

    let organiser = organisers::find_organiser(&state.conn, organiser_id).await?;
    let by_status = |status: TournamentStatus| {
        tournaments::Entity::find()
            .filter(tournaments::Column::OrganiserId.eq(organiser_id))
            .filter(tournaments::Column::Status.eq(status))
            .count(&state.conn)
    };

    let dashboard = OrganiserDashboardSchema {
        pending_tournaments: by_status(TournamentStatus::Pending).await?,
        approved_tournaments: by_status(TournamentStatus::Approved).await?,
        completed_tournaments: by_status(TournamentStatus::Completed).await?,
        followers: organisers::follower_count(&state.conn, organiser_id).await?,
        unread_notifications: notifications::Entity::find()
            .filter(notifications::Column::OrganiserId.eq(organiser_id))
            .filter(notifications::Column::Read.eq(false))
            .count(&state.conn)
            .await?,
        id: organiser.id,
        username: organiser.username,
        total_revenue: organiser.total_revenue,
        rating: organiser.rating,
    };
    state.cache.set_json(&key, &dashboard).await;
    Ok(dashboard)
}
