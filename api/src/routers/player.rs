use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};

use app::persistence::{dashboard, organisers, players};
use app::state::AppState;
use models::params::{organiser::RateOrganiserParams, player::UpdatePlayerParams};
use models::queries::SearchQuery;
use models::schemas::player::PlayerSchema;

use crate::extractor::{Json, Path, Query, Valid};
use crate::middleware::auth::PlayerAuth;
use crate::{ApiResponse, error::ApiError};

async fn dashboard_get(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
) -> Result<impl IntoResponse, ApiError> {
    let dashboard = dashboard::player_dashboard(&state, &player.id).await?;
    Ok(Json(ApiResponse::success(
        "Dashboard retrieved successfully",
        Some(dashboard),
    )))
}

async fn me_get(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
) -> Result<impl IntoResponse, ApiError> {
    let player = players::find_player(&state.conn, &player.id).await?;
    Ok(Json(ApiResponse::success(
        "Player retrieved successfully",
        Some(PlayerSchema::from(player)),
    )))
}

async fn me_patch(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
    Valid(Json(params)): Valid<Json<UpdatePlayerParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let player = players::update_player(&state, &player.id, params).await?;
    Ok(Json(ApiResponse::success(
        "Profile updated successfully",
        Some(PlayerSchema::from(player)),
    )))
}

async fn history_get(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
) -> Result<impl IntoResponse, ApiError> {
    let history = players::participation_history(&state.conn, &player.id, None).await?;
    Ok(Json(ApiResponse::success(
        "Participation history retrieved successfully",
        Some(history),
    )))
}

async fn search_get(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let found = players::search_players(&state.conn, query).await?;
    Ok(Json(ApiResponse::success("Players retrieved successfully", Some(found))))
}

async fn profile_get(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = players::get_profile(&state, &username).await?;
    Ok(Json(ApiResponse::success(
        "Profile retrieved successfully",
        Some(profile),
    )))
}

async fn following_get(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
) -> Result<impl IntoResponse, ApiError> {
    let following = players::following(&state.conn, &player.id).await?;
    Ok(Json(ApiResponse::success(
        "Followed organisers retrieved successfully",
        Some(following),
    )))
}

async fn follow_post(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
    Path(organiser_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    players::follow_organiser(&state, &player.id, &organiser_id).await?;
    Ok(Json(ApiResponse::<()>::success("Organiser followed", None)))
}

async fn follow_delete(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
    Path(organiser_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    players::unfollow_organiser(&state, &player.id, &organiser_id).await?;
    Ok(Json(ApiResponse::<()>::success("Organiser unfollowed", None)))
}

async fn rate_post(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
    Path(organiser_id): Path<String>,
    Valid(Json(params)): Valid<Json<RateOrganiserParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let organiser =
        organisers::rate_organiser(&state, &player.id, &organiser_id, params.stars).await?;
    Ok(Json(ApiResponse::success(
        "Rating recorded",
        Some(organiser.rating),
    )))
}

pub fn create_player_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard_get))
        .route("/me", get(me_get).patch(me_patch))
        .route("/history", get(history_get))
        .route("/search", get(search_get))
        .route("/profile/{username}", get(profile_get))
        .route("/following", get(following_get))
        .route("/follow/{organiser_id}", post(follow_post).delete(follow_delete))
        .route("/rate/{organiser_id}", post(rate_post))
}
