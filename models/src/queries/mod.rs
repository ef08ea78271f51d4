use serde::Deserialize;

use crate::domains::sea_orm_active_enums::{ReportStatus, TournamentStatus};

#[derive(Deserialize, Debug)]
pub struct PaginationQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: Some(1),
            limit: Some(15),
        }
    }
}

impl PaginationQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(15).clamp(1, 100)
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct TournamentQuery {
    pub status: Option<TournamentStatus>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl TournamentQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct ReportQuery {
    pub status: Option<ReportStatus>,
}

#[derive(Deserialize, Debug, Default)]
pub struct LeaderboardQuery {
    pub limit: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
pub struct SearchQuery {
    #[serde(default)]
    pub username: String,
}
