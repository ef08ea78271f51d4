use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domains::{
    ban_history, reports,
    sea_orm_active_enums::{BannedEntity, ReportStatus},
};

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ReportSchema {
    pub id: i32,
    pub reporter_id: String,
    pub reported_team_id: Option<String>,
    pub reported_organiser_id: Option<String>,
    pub reason: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

impl From<reports::Model> for ReportSchema {
    fn from(report: reports::Model) -> Self {
        Self {
            id: report.id,
            reporter_id: report.reporter_id,
            reported_team_id: report.reported_team_id,
            reported_organiser_id: report.reported_organiser_id,
            reason: report.reason,
            status: report.status,
            created_at: report.created_at.to_utc(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BanHistorySchema {
    pub id: i32,
    pub entity_id: String,
    pub entity_type: BannedEntity,
    pub reason: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ban_history::Model> for BanHistorySchema {
    fn from(record: ban_history::Model) -> Self {
        Self {
            id: record.id,
            entity_id: record.entity_id,
            entity_type: record.entity_type,
            reason: record.reason,
            active: record.active,
            created_at: record.created_at.to_utc(),
        }
    }
}
