use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, ConnectionTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};

use models::domains::{
    organisers, participations, players, sea_orm_active_enums::TournamentStatus, teams,
    tournaments,
};
use models::schemas::analytics::{LeaderboardEntrySchema, PlatformSummarySchema};

use crate::cache::keys;
use crate::core::ranking::{PlayerRecord, rank_players, win_percentage};
use crate::error::AppResult;
use crate::state::AppState;

/// Cached leaderboard depth; requests slice from it.
const LEADERBOARD_DEPTH: usize = 100;

/// Every active player's record, in global rank order.
pub async fn ranked_records<C: ConnectionTrait>(db: &C) -> AppResult<Vec<PlayerRecord>> {
    let roster: Vec<(String, String)> = players::Entity::find()
        .select_only()
        .column(players::Column::Id)
        .column(players::Column::Username)
        .filter(players::Column::Banned.eq(false))
        .into_tuple()
        .all(db)
        .await?;
    let results: Vec<(String, bool)> = participations::Entity::find()
        .select_only()
        .column(participations::Column::PlayerId)
        .column(participations::Column::Won)
        .into_tuple()
        .all(db)
        .await?;

    let mut tally: HashMap<String, (u64, u64)> = HashMap::new();
    for (player_id, won) in results {
        let entry = tally.entry(player_id).or_default();
        entry.0 += 1;
        if won {
            entry.1 += 1;
        }
    }

    let mut records: Vec<PlayerRecord> = roster
        .into_iter()
        .map(|(player_id, username)| {
            let (played, won) = tally.get(&player_id).copied().unwrap_or_default();
            PlayerRecord {
                player_id,
                username,
                played,
                won,
            }
        })
        .collect();
    rank_players(&mut records);
    Ok(records)
}

pub async fn leaderboard(state: &AppState, limit: u64) -> AppResult<Vec<LeaderboardEntrySchema>> {
    let limit = (limit as usize).clamp(1, LEADERBOARD_DEPTH);

    let board: Vec<LeaderboardEntrySchema> = match state.cache.get_json(keys::LEADERBOARD).await {
        Some(board) => board,
        None => {
            let board: Vec<_> = ranked_records(&state.conn)
                .await?
                .into_iter()
                .take(LEADERBOARD_DEPTH)
                .enumerate()
                .map(|(pos, r)| LeaderboardEntrySchema {
                    rank: pos as u64 + 1,
                    win_percentage: win_percentage(r.played, r.won),
                    player_id: r.player_id,
                    username: r.username,
                    tournaments_played: r.played,
                    tournaments_won: r.won,
                })
                .collect();
            state.cache.set_json(keys::LEADERBOARD, &board).await;
            board
        }
    };

    Ok(board.into_iter().take(limit).collect())
}

pub async fn platform_summary(state: &AppState) -> AppResult<PlatformSummarySchema> {
    if let Some(summary) = state.cache.get_json(keys::PLATFORM_SUMMARY).await {
        return Ok(summary);
    }

    let conn: &DbConn = &state.conn;
    let total_revenue: Vec<i64> = organisers::Entity::find()
        .select_only()
        .column(organisers::Column::TotalRevenue)
        .into_tuple()
        .all(conn)
        .await?;

    let summary = PlatformSummarySchema {
        players: players::Entity::find().count(conn).await?,
        organisers: organisers::Entity::find().count(conn).await?,
        teams: teams::Entity::find().count(conn).await?,
        tournaments: tournaments::Entity::find()
            .filter(tournaments::Column::Status.ne(TournamentStatus::Pending))
            .count(conn)
            .await?,
        completed_tournaments: tournaments::Entity::find()
            .filter(tournaments::Column::Status.eq(TournamentStatus::Completed))
            .count(conn)
            .await?,
        total_revenue: total_revenue.into_iter().sum(),
    };
    state.cache.set_json(keys::PLATFORM_SUMMARY, &summary).await;
    Ok(summary)
}
