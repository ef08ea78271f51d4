use axum::{Router, extract::State, response::IntoResponse, routing::get};

use app::state::AppState;

use crate::extractor::Json;
use crate::{ApiResponse, error::ApiError};

async fn health_get(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    state.conn.ping().await?;
    Ok(Json(ApiResponse::<()>::success("OK", None)))
}

pub fn create_health_router() -> Router<AppState> {
    Router::new().route("/", get(health_get))
}
