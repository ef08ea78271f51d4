use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_cookies::{
    Cookie, Cookies,
    cookie::{SameSite, time::Duration},
};

use app::persistence::{auth::login, organisers::register_organiser, players::register_player};
use app::config::Config;
use app::state::AppState;
use app::utils::jwt::{JWT_EXPIRATION_DURATION, encode_data};
use models::params::auth::{LoginParams, RegisterParams};
use models::schemas::{
    auth::{LoginSchema, Principal, Role, TokenSubject},
    organiser::OrganiserSchema,
    player::PlayerSchema,
};

use crate::extractor::{Json, Valid};
use crate::middleware::{auth::AnyAuth, identify::TOKEN_COOKIE};
use crate::{ApiResponse, error::ApiError};

fn token_cookie(config: &Config, token: String) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies)
        .max_age(Duration::seconds(JWT_EXPIRATION_DURATION.as_secs() as i64))
        .build()
}

async fn sign_in(
    state: &AppState,
    cookies: &Cookies,
    role: Role,
    params: LoginParams,
) -> Result<Json<ApiResponse<LoginSchema>>, ApiError> {
    let principal = login(&state.conn, role, params).await?;
    let token = encode_data(
        &state.config,
        TokenSubject {
            id: principal.id.clone(),
            role,
        },
    )?;
    cookies.add(token_cookie(&state.config, token.clone()));

    tracing::info!(id = %principal.id, %role, "Signed in");
    Ok(Json(ApiResponse::success(
        "Logged in successfully",
        Some(LoginSchema { principal, token }),
    )))
}

async fn player_register_post(
    State(state): State<AppState>,
    Valid(Json(params)): Valid<Json<RegisterParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let player = register_player(&state, params).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Player registered successfully",
            Some(PlayerSchema::from(player)),
        )),
    ))
}

async fn organiser_register_post(
    State(state): State<AppState>,
    Valid(Json(params)): Valid<Json<RegisterParams>>,
) -> Result<impl IntoResponse, ApiError> {
    let organiser = register_organiser(&state, params).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Organiser registered successfully",
            Some(OrganiserSchema::from(organiser)),
        )),
    ))
}

async fn player_login_post(
    State(state): State<AppState>,
    cookies: Cookies,
    Valid(Json(params)): Valid<Json<LoginParams>>,
) -> Result<impl IntoResponse, ApiError> {
    sign_in(&state, &cookies, Role::Player, params).await
}

async fn organiser_login_post(
    State(state): State<AppState>,
    cookies: Cookies,
    Valid(Json(params)): Valid<Json<LoginParams>>,
) -> Result<impl IntoResponse, ApiError> {
    sign_in(&state, &cookies, Role::Organiser, params).await
}

async fn admin_login_post(
    State(state): State<AppState>,
    cookies: Cookies,
    Valid(Json(params)): Valid<Json<LoginParams>>,
) -> Result<impl IntoResponse, ApiError> {
    sign_in(&state, &cookies, Role::Admin, params).await
}

async fn logout_post(cookies: Cookies) -> impl IntoResponse {
    cookies.remove(Cookie::build((TOKEN_COOKIE, "")).path("/").build());
    Json(ApiResponse::<()>::success("Logged out successfully", None))
}

async fn me_get(AnyAuth(principal): AnyAuth) -> Json<ApiResponse<Principal>> {
    Json(ApiResponse::success("Current user", Some(principal)))
}

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/player/register", post(player_register_post))
        .route("/player/login", post(player_login_post))
        .route("/organiser/register", post(organiser_register_post))
        .route("/organiser/login", post(organiser_login_post))
        .route("/admin/login", post(admin_login_post))
        .route("/logout", post(logout_post))
        .route("/me", get(me_get))
}
