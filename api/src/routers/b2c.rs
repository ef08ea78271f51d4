use axum::{Router, extract::State, response::IntoResponse, routing::get};

use app::persistence::{analytics::leaderboard, tournaments::upcoming_tournaments};
use app::state::AppState;
use models::queries::LeaderboardQuery;

use crate::extractor::{Json, Query};
use crate::{ApiResponse, error::ApiError};

const DEFAULT_LIMIT: u64 = 10;

async fn leaderboard_get(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = leaderboard(&state, query.limit.unwrap_or(DEFAULT_LIMIT)).await?;
    Ok(Json(ApiResponse::success(
        "Leaderboard retrieved successfully",
        Some(entries),
    )))
}

async fn upcoming_get(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 100);
    let tournaments = upcoming_tournaments(&state.conn, limit).await?;
    Ok(Json(ApiResponse::success(
        "Upcoming tournaments retrieved successfully",
        Some(tournaments),
    )))
}

pub fn create_b2c_router() -> Router<AppState> {
    Router::new()
        .route("/leaderboard", get(leaderboard_get))
        .route("/tournaments/upcoming", get(upcoming_get))
}
