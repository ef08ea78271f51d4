use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntrySchema {
    pub rank: u64,
    pub player_id: String,
    pub username: String,
    pub tournaments_played: u64,
    pub tournaments_won: u64,
    pub win_percentage: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSummarySchema {
    pub players: u64,
    pub organisers: u64,
    pub teams: u64,
    pub tournaments: u64,
    pub completed_tournaments: u64,
    pub total_revenue: i64,
}
