use axum::{Router, extract::State, response::IntoResponse, routing::get};

use app::persistence::{analytics::platform_summary, organisers::public_profile};
use app::state::AppState;

use crate::extractor::{Json, Path};
use crate::{ApiResponse, error::ApiError};

async fn summary_get(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let summary = platform_summary(&state).await?;
    Ok(Json(ApiResponse::success(
        "Platform summary retrieved successfully",
        Some(summary),
    )))
}

async fn organisers_id_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = public_profile(&state.conn, &id).await?;
    Ok(Json(ApiResponse::success(
        "Organiser retrieved successfully",
        Some(profile),
    )))
}

pub fn create_b2b_router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(summary_get))
        .route("/organisers/{id}", get(organisers_id_get))
}
