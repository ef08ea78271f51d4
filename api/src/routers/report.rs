use axum::{Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};

use app::persistence::moderation::create_report;
use app::state::AppState;
use models::params::moderation::CreateReportParams;

use crate::extractor::{Json, Valid};
use crate::middleware::auth::PlayerAuth;
use crate::{ApiResponse, error::ApiError};

async fn reports_post(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
    Valid(Json(params)): Valid<Json<CreateReportParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let report = create_report(&state.conn, &player.id, params).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Report submitted", Some(report))),
    ))
}

pub fn create_report_router() -> Router<AppState> {
    Router::new().route("/", post(reports_post))
}
