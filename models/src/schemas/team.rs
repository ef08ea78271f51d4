use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domains::{team_join_requests, teams};

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummarySchema {
    pub id: String,
    pub name: String,
    pub captain_id: String,
}

impl From<teams::Model> for TeamSummarySchema {
    fn from(team: teams::Model) -> Self {
        Self {
            id: team.id,
            name: team.name,
            captain_id: team.captain_id,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MemberSchema {
    pub id: String,
    pub username: String,
    pub captain: bool,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TeamSchema {
    pub id: String,
    pub name: String,
    pub captain_id: String,
    pub banned: bool,
    pub created_at: DateTime<Utc>,
    pub players: Vec<MemberSchema>,
    pub tournaments: Vec<String>,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequestSchema {
    pub id: String,
    pub team_id: String,
    pub player_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<team_join_requests::Model> for JoinRequestSchema {
    fn from(request: team_join_requests::Model) -> Self {
        Self {
            id: request.id,
            team_id: request.team_id,
            player_id: request.player_id,
            created_at: request.created_at.to_utc(),
        }
    }
}
