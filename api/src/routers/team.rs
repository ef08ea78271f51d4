use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use app::persistence::teams;
use app::state::AppState;
use models::params::team::{CreateTeamParams, TransferCaptaincyParams};
use models::schemas::team::TeamSummarySchema;

use crate::extractor::{Json, Path, Valid};
use crate::middleware::auth::PlayerAuth;
use crate::{ApiResponse, error::ApiError};

async fn teams_post(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
    Valid(Json(params)): Valid<Json<CreateTeamParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let team = teams::create_team(&state, &player.id, params).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Team created successfully",
            Some(TeamSummarySchema::from(team)),
        )),
    ))
}

async fn teams_id_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let team = teams::get_team(&state.conn, &id).await?;
    Ok(Json(ApiResponse::success("Team retrieved successfully", Some(team))))
}

async fn join_post(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let request = teams::join_team(&state.conn, &id, &player.id).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(ApiResponse::success(
            "Join request sent to the team captain",
            Some(request),
        )),
    ))
}

async fn requests_post(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let request = teams::request_to_join_team(&state.conn, &id, &player.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Join request sent", Some(request))),
    ))
}

async fn requests_get(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let requests = teams::list_join_requests(&state.conn, &id, &player.id).await?;
    Ok(Json(ApiResponse::success(
        "Join requests retrieved successfully",
        Some(requests),
    )))
}

async fn accept_post(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
    Path(request_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let team = teams::accept_join_request(&state, &request_id, &player.id).await?;
    Ok(Json(ApiResponse::success("Join request accepted", Some(team))))
}

async fn reject_post(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
    Path(request_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    teams::reject_join_request(&state.conn, &request_id, &player.id).await?;
    Ok(Json(ApiResponse::<()>::success("Join request rejected", None)))
}

async fn leave_post(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
) -> Result<impl IntoResponse, ApiError> {
    let disbanded = teams::leave_team(&state, &player.id).await?;
    let message = match disbanded {
        true => "Left team; the team was disbanded",
        false => "Left team successfully",
    };
    Ok(Json(ApiResponse::<()>::success(message, None)))
}

async fn captain_post(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
    Path(id): Path<String>,
    Valid(Json(params)): Valid<Json<TransferCaptaincyParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let team = teams::transfer_captaincy(&state.conn, &id, &player.id, &params.player_id).await?;
    Ok(Json(ApiResponse::success(
        "Captaincy transferred",
        Some(TeamSummarySchema::from(team)),
    )))
}

pub fn create_team_router() -> Router<AppState> {
    Router::new()
        .route("/", post(teams_post))
        .route("/leave", post(leave_post))
        .route("/requests/{request_id}/accept", post(accept_post))
        .route("/requests/{request_id}/reject", post(reject_post))
        .route("/{id}", get(teams_id_get))
        .route("/{id}/join", post(join_post))
        .route("/{id}/requests", get(requests_get).post(requests_post))
        .route("/{id}/captain", post(captain_post))
}
