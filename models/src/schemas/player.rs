use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domains::players;

use super::team::TeamSummarySchema;

/// Private view of a player, returned to the player themself.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSchema {
    pub id: String,
    pub username: String,
    pub email: String,
    pub team_id: Option<String>,
    pub banned: bool,
    pub team_payment_paid: bool,
    pub created_at: DateTime<Utc>,
}

impl From<players::Model> for PlayerSchema {
    fn from(player: players::Model) -> Self {
        Self {
            id: player.id,
            username: player.username,
            email: player.email,
            team_id: player.team_id,
            banned: player.banned,
            team_payment_paid: player.team_payment_paid,
            created_at: player.created_at.to_utc(),
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PlayerSummarySchema {
    pub id: String,
    pub username: String,
}

impl From<players::Model> for PlayerSummarySchema {
    fn from(player: players::Model) -> Self {
        Self {
            id: player.id,
            username: player.username,
        }
    }
}

#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub tournaments_played: u64,
    pub tournaments_won: u64,
    pub win_percentage: f64,
}

#[derive(Serialize, serde::Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationSchema {
    pub tournament_id: String,
    pub tournament_name: String,
    pub team_id: String,
    pub won: bool,
}

/// Public profile; visible to anyone.
#[derive(Serialize, serde::Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfileSchema {
    pub id: String,
    pub username: String,
    pub team_name: Option<String>,
    pub tournaments_played: u64,
    pub tournaments_won: u64,
    pub win_percentage: f64,
}

#[derive(Serialize, serde::Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDashboardSchema {
    pub id: String,
    pub username: String,
    pub email: String,
    pub team: Option<TeamSummarySchema>,
    pub tournaments_played: u64,
    pub tournaments_won: u64,
    pub win_percentage: f64,
    pub global_rank: u64,
    pub total_players: u64,
    pub following: Vec<String>,
    pub recent_tournaments: Vec<ParticipationSchema>,
}
