use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::{get, patch, post},
};

use app::persistence::{dashboard, notifications, organisers, tournaments};
use app::state::AppState;
use models::params::organiser::{UpdateOrganiserParams, VisibilityParams};
use models::schemas::organiser::OrganiserSchema;

use crate::extractor::{Json, Path, Valid};
use crate::middleware::auth::OrganiserAuth;
use crate::{ApiResponse, error::ApiError};

async fn dashboard_get(
    State(state): State<AppState>,
    OrganiserAuth(organiser): OrganiserAuth,
) -> Result<impl IntoResponse, ApiError> {
    let dashboard = dashboard::organiser_dashboard(&state, &organiser.id).await?;
    Ok(Json(ApiResponse::success(
        "Dashboard retrieved successfully",
        Some(dashboard),
    )))
}

async fn me_get(
    State(state): State<AppState>,
    OrganiserAuth(organiser): OrganiserAuth,
) -> Result<impl IntoResponse, ApiError> {
    let organiser = organisers::find_organiser(&state.conn, &organiser.id).await?;
    Ok(Json(ApiResponse::success(
        "Organiser retrieved successfully",
        Some(OrganiserSchema::from(organiser)),
    )))
}

async fn me_patch(
    State(state): State<AppState>,
    OrganiserAuth(organiser): OrganiserAuth,
    Valid(Json(params)): Valid<Json<UpdateOrganiserParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let organiser = organisers::update_organiser(&state, &organiser.id, params).await?;
    Ok(Json(ApiResponse::success(
        "Profile updated successfully",
        Some(OrganiserSchema::from(organiser)),
    )))
}

async fn visibility_patch(
    State(state): State<AppState>,
    OrganiserAuth(organiser): OrganiserAuth,
    Json(params): Json<VisibilityParams>,
) -> Result<impl IntoResponse, ApiError> {
    let organiser = organisers::update_visibility(&state, &organiser.id, params).await?;
    Ok(Json(ApiResponse::success(
        "Visibility updated successfully",
        Some(OrganiserSchema::from(organiser)),
    )))
}

async fn tournaments_get(
    State(state): State<AppState>,
    OrganiserAuth(organiser): OrganiserAuth,
) -> Result<impl IntoResponse, ApiError> {
    let list = tournaments::organiser_tournaments(&state.conn, &organiser.id).await?;
    Ok(Json(ApiResponse::success(
        "Tournaments retrieved successfully",
        Some(list),
    )))
}

async fn followers_get(
    State(state): State<AppState>,
    OrganiserAuth(organiser): OrganiserAuth,
) -> Result<impl IntoResponse, ApiError> {
    let followers = organisers::list_followers(&state.conn, &organiser.id).await?;
    Ok(Json(ApiResponse::success(
        "Followers retrieved successfully",
        Some(followers),
    )))
}

async fn notifications_get(
    State(state): State<AppState>,
    OrganiserAuth(organiser): OrganiserAuth,
) -> Result<impl IntoResponse, ApiError> {
    let list = notifications::list_notifications(&state.conn, &organiser.id).await?;
    Ok(Json(ApiResponse::success(
        "Notifications retrieved successfully",
        Some(list),
    )))
}

async fn notification_read_post(
    State(state): State<AppState>,
    OrganiserAuth(organiser): OrganiserAuth,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    notifications::mark_read(&state.conn, &organiser.id, id).await?;
    Ok(Json(ApiResponse::<()>::success("Notification marked as read", None)))
}

async fn notifications_read_all_post(
    State(state): State<AppState>,
    OrganiserAuth(organiser): OrganiserAuth,
) -> Result<impl IntoResponse, ApiError> {
    let updated = notifications::mark_all_read(&state.conn, &organiser.id).await?;
    Ok(Json(ApiResponse::success(
        "Notifications marked as read",
        Some(updated),
    )))
}

async fn banned_teams_get(
    State(state): State<AppState>,
    OrganiserAuth(organiser): OrganiserAuth,
) -> Result<impl IntoResponse, ApiError> {
    let teams = organisers::list_banned_teams(&state.conn, &organiser.id).await?;
    Ok(Json(ApiResponse::success(
        "Banned teams retrieved successfully",
        Some(teams),
    )))
}

async fn banned_team_post(
    State(state): State<AppState>,
    OrganiserAuth(organiser): OrganiserAuth,
    Path(team_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    organisers::ban_team(&state.conn, &organiser.id, &team_id).await?;
    Ok(Json(ApiResponse::<()>::success("Team banned", None)))
}

async fn banned_team_delete(
    State(state): State<AppState>,
    OrganiserAuth(organiser): OrganiserAuth,
    Path(team_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    organisers::unban_team(&state.conn, &organiser.id, &team_id).await?;
    Ok(Json(ApiResponse::<()>::success("Team unbanned", None)))
}

async fn profile_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = organisers::public_profile(&state.conn, &id).await?;
    Ok(Json(ApiResponse::success(
        "Organiser retrieved successfully",
        Some(profile),
    )))
}

pub fn create_organiser_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard_get))
        .route("/me", get(me_get).patch(me_patch))
        .route("/visibility", patch(visibility_patch))
        .route("/tournaments", get(tournaments_get))
        .route("/followers", get(followers_get))
        .route("/notifications", get(notifications_get))
        .route("/notifications/read", post(notifications_read_all_post))
        .route("/notifications/{id}/read", post(notification_read_post))
        .route("/banned-teams", get(banned_teams_get))
        .route(
            "/banned-teams/{team_id}",
            post(banned_team_post).delete(banned_team_delete),
        )
        .route("/{id}", get(profile_get))
}
