use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};

use app::persistence::tournaments::{
    create_tournament, get_tournament, join_tournament, leave_tournament, list_tournaments,
    points_table, update_points_table, update_winner,
};
use app::state::AppState;
use models::params::tournament::{CreateTournamentParams, UpdatePointsParams, UpdateWinnerParams};
use models::queries::TournamentQuery;
use models::schemas::tournament::TournamentSchema;

use crate::extractor::{Json, Path, Query, Valid};
use crate::middleware::auth::{OrganiserAuth, PlayerAuth};
use crate::{ApiResponse, error::ApiError};

async fn tournaments_post(
    State(state): State<AppState>,
    OrganiserAuth(organiser): OrganiserAuth,
    Valid(Json(params)): Valid<Json<CreateTournamentParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let tournament = create_tournament(&state.conn, &organiser.id, params).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Tournament created successfully",
            Some(TournamentSchema::from(tournament)),
        )),
    ))
}

async fn tournaments_get(
    State(state): State<AppState>,
    Query(query): Query<TournamentQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let result = list_tournaments(&state.conn, query).await?;
    Ok(Json(ApiResponse::success(
        "Tournaments retrieved successfully",
        Some(result),
    )))
}

async fn tournaments_id_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let result = get_tournament(&state.conn, &id).await?;
    Ok(Json(ApiResponse::success(
        "Tournament retrieved successfully",
        Some(result),
    )))
}

async fn points_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let table = points_table(&state.conn, &id).await?;
    Ok(Json(ApiResponse::success(
        "Points table retrieved successfully",
        Some(table),
    )))
}

async fn points_patch(
    State(state): State<AppState>,
    OrganiserAuth(organiser): OrganiserAuth,
    Path(id): Path<String>,
    Valid(Json(params)): Valid<Json<UpdatePointsParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let table = update_points_table(&state.conn, &id, &organiser.id, params).await?;
    Ok(Json(ApiResponse::success(
        "Points table updated successfully",
        Some(table),
    )))
}

async fn winner_patch(
    State(state): State<AppState>,
    OrganiserAuth(organiser): OrganiserAuth,
    Path(id): Path<String>,
    Valid(Json(params)): Valid<Json<UpdateWinnerParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let tournament = update_winner(&state.conn, &id, &organiser.id, &params.team_id).await?;
    Ok(Json(ApiResponse::success(
        "Winner declared successfully",
        Some(TournamentSchema::from(tournament)),
    )))
}

async fn join_post(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let tournament = join_tournament(&state.conn, &id, &player.id).await?;
    Ok(Json(ApiResponse::success(
        "Joined tournament successfully",
        Some(TournamentSchema::from(tournament)),
    )))
}

async fn leave_post(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let tournament = leave_tournament(&state.conn, &id, &player.id).await?;
    Ok(Json(ApiResponse::success(
        "Left tournament successfully",
        Some(TournamentSchema::from(tournament)),
    )))
}

pub fn create_tournament_router() -> Router<AppState> {
    Router::new()
        .route("/", get(tournaments_get).post(tournaments_post))
        .route("/{id}", get(tournaments_id_get))
        .route("/{id}/points", get(points_get).patch(points_patch))
        .route("/{id}/winner", patch(winner_patch))
        .route("/{id}/join", post(join_post))
        .route("/{id}/leave", post(leave_post))
}
