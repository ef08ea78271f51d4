use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domains::{sea_orm_active_enums::TournamentStatus, tournament_entries, tournaments};

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSchema {
    pub id: String,
    pub tid: String,
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub entry_fee: i64,
    pub prize_pool: i64,
    pub status: TournamentStatus,
    pub organiser_id: String,
    pub winner_team_id: Option<String>,
    pub revenue: i64,
    pub created_at: DateTime<Utc>,
}

impl From<tournaments::Model> for TournamentSchema {
    fn from(tournament: tournaments::Model) -> Self {
        Self {
            id: tournament.id,
            tid: tournament.tid,
            name: tournament.name,
            description: tournament.description,
            start_date: tournament.start_date.to_utc(),
            end_date: tournament.end_date.to_utc(),
            entry_fee: tournament.entry_fee,
            prize_pool: tournament.prize_pool,
            status: tournament.status,
            organiser_id: tournament.organiser_id,
            winner_team_id: tournament.winner_team_id,
            revenue: tournament.revenue,
            created_at: tournament.created_at.to_utc(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PointsEntrySchema {
    pub ranking: i32,
    pub team_id: String,
    pub team_name: String,
    pub points: i32,
}

impl From<tournament_entries::Model> for PointsEntrySchema {
    fn from(entry: tournament_entries::Model) -> Self {
        Self {
            ranking: entry.ranking,
            team_id: entry.team_id,
            team_name: entry.team_name,
            points: entry.points,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TournamentDetailSchema {
    #[serde(flatten)]
    pub tournament: TournamentSchema,
    pub points_table: Vec<PointsEntrySchema>,
}
