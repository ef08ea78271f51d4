use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use app::persistence::payments::{confirm_payment, create_payment_intent, list_payments};
use app::state::AppState;
use models::params::payment::ConfirmPaymentParams;

use crate::extractor::{Json, Valid};
use crate::middleware::auth::PlayerAuth;
use crate::{ApiResponse, error::ApiError};

async fn intent_post(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
) -> Result<impl IntoResponse, ApiError> {
    let intent = create_payment_intent(&state, &player.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Payment intent created", Some(intent))),
    ))
}

async fn confirm_post(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
    Valid(Json(params)): Valid<Json<ConfirmPaymentParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = confirm_payment(&state, &player.id, &params.payment_intent_id).await?;
    Ok(Json(ApiResponse::success("Payment confirmed", Some(payment))))
}

async fn payments_get(
    State(state): State<AppState>,
    PlayerAuth(player): PlayerAuth,
) -> Result<impl IntoResponse, ApiError> {
    let payments = list_payments(&state.conn, &player.id).await?;
    Ok(Json(ApiResponse::success(
        "Payments retrieved successfully",
        Some(payments),
    )))
}

pub fn create_payment_router() -> Router<AppState> {
    Router::new()
        .route("/", get(payments_get))
        .route("/intent", post(intent_post))
        .route("/confirm", post(confirm_post))
}
