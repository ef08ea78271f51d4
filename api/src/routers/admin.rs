use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};

use app::persistence::{moderation, tournaments};
use app::state::AppState;
use models::domains::sea_orm_active_enums::BannedEntity;
use models::params::{moderation::BanParams, tournament::RejectTournamentParams};
use models::queries::{ReportQuery, TournamentQuery};
use models::schemas::auth::Principal;
use models::schemas::tournament::TournamentSchema;

use crate::extractor::{Json, Path, Query, Valid};
use crate::middleware::auth::AdminAuth;
use crate::{ApiResponse, error::ApiError};

async fn tournaments_get(
    State(state): State<AppState>,
    _: AdminAuth,
    Query(query): Query<TournamentQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let result = tournaments::list_tournaments(&state.conn, query).await?;
    Ok(Json(ApiResponse::success(
        "Tournaments retrieved successfully",
        Some(result),
    )))
}

async fn approve_post(
    State(state): State<AppState>,
    AdminAuth(admin): AdminAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let tournament = tournaments::approve_tournament(&state.conn, &id).await?;
    tracing::info!(admin_id = %admin.id, tournament_id = %id, "Tournament approved");
    Ok(Json(ApiResponse::success(
        "Tournament approved",
        Some(TournamentSchema::from(tournament)),
    )))
}

async fn reject_post(
    State(state): State<AppState>,
    AdminAuth(admin): AdminAuth,
    Path(id): Path<String>,
    Valid(Json(params)): Valid<Json<RejectTournamentParams>>,
) -> Result<impl IntoResponse, ApiError> {
    tournaments::reject_tournament(&state.conn, &id, &params.reason).await?;
    tracing::info!(admin_id = %admin.id, tournament_id = %id, "Tournament rejected");
    Ok(Json(ApiResponse::<()>::success("Tournament rejected", None)))
}

async fn ban(
    state: &AppState,
    admin: &Principal,
    entity: BannedEntity,
    id: &str,
    reason: &str,
) -> Result<Json<ApiResponse<models::schemas::moderation::BanHistorySchema>>, ApiError> {
    let record = moderation::ban(&state.conn, entity, id, reason).await?;
    tracing::info!(admin_id = %admin.id, ?entity, id, "Ban issued");
    Ok(Json(ApiResponse::success("Ban issued", Some(record))))
}

async fn unban(
    state: &AppState,
    admin: &Principal,
    entity: BannedEntity,
    id: &str,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    moderation::unban(&state.conn, entity, id).await?;
    tracing::info!(admin_id = %admin.id, ?entity, id, "Ban lifted");
    Ok(Json(ApiResponse::success("Ban lifted", None)))
}

async fn player_ban_post(
    State(state): State<AppState>,
    AdminAuth(admin): AdminAuth,
    Path(id): Path<String>,
    Valid(Json(params)): Valid<Json<BanParams>>,
) -> Result<impl IntoResponse, ApiError> {
    ban(&state, &admin, BannedEntity::Player, &id, &params.reason).await
}

async fn player_unban_post(
    State(state): State<AppState>,
    AdminAuth(admin): AdminAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    unban(&state, &admin, BannedEntity::Player, &id).await
}

async fn organiser_ban_post(
    State(state): State<AppState>,
    AdminAuth(admin): AdminAuth,
    Path(id): Path<String>,
    Valid(Json(params)): Valid<Json<BanParams>>,
) -> Result<impl IntoResponse, ApiError> {
    ban(&state, &admin, BannedEntity::Organiser, &id, &params.reason).await
}

async fn organiser_unban_post(
    State(state): State<AppState>,
    AdminAuth(admin): AdminAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    unban(&state, &admin, BannedEntity::Organiser, &id).await
}

async fn team_ban_post(
    State(state): State<AppState>,
    AdminAuth(admin): AdminAuth,
    Path(id): Path<String>,
    Valid(Json(params)): Valid<Json<BanParams>>,
) -> Result<impl IntoResponse, ApiError> {
    ban(&state, &admin, BannedEntity::Team, &id, &params.reason).await
}

async fn team_unban_post(
    State(state): State<AppState>,
    AdminAuth(admin): AdminAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    unban(&state, &admin, BannedEntity::Team, &id).await
}

async fn ban_history_get(
    State(state): State<AppState>,
    _: AdminAuth,
    Path(entity_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let history = moderation::ban_history(&state.conn, &entity_id).await?;
    Ok(Json(ApiResponse::success(
        "Ban history retrieved successfully",
        Some(history),
    )))
}

async fn reports_get(
    State(state): State<AppState>,
    _: AdminAuth,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let reports = moderation::list_reports(&state.conn, query).await?;
    Ok(Json(ApiResponse::success(
        "Reports retrieved successfully",
        Some(reports),
    )))
}

async fn review_post(
    State(state): State<AppState>,
    AdminAuth(admin): AdminAuth,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let report = moderation::review_report(&state.conn, id).await?;
    tracing::info!(admin_id = %admin.id, report_id = id, "Report reviewed");
    Ok(Json(ApiResponse::success("Report reviewed", Some(report))))
}

pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/tournaments", get(tournaments_get))
        .route("/tournaments/{id}/approve", post(approve_post))
        .route("/tournaments/{id}/reject", post(reject_post))
        .route("/players/{id}/ban", post(player_ban_post))
        .route("/players/{id}/unban", post(player_unban_post))
        .route("/organisers/{id}/ban", post(organiser_ban_post))
        .route("/organisers/{id}/unban", post(organiser_unban_post))
        .route("/teams/{id}/ban", post(team_ban_post))
        .route("/teams/{id}/unban", post(team_unban_post))
        .route("/bans/{entity_id}", get(ban_history_get))
        .route("/reports", get(reports_get))
        .route("/reports/{id}/review", post(review_post))
}
