use axum::Router;
use axum::http::{HeaderValue, Method, header};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tower_cookies::CookieManagerLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use app::config::{Config, ConfigError};
use app::state::AppState;

use crate::routers::create_router;

pub fn setup_router(state: AppState) -> Router {
    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::OPTIONS,
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    match state.config.allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => cors = cors.allow_origin(origin),
        Err(_) => tracing::warn!(
            origin = %state.config.allowed_origin,
            "ALLOWED_ORIGIN is not a valid header value, cross-origin requests are refused"
        ),
    }

    create_router(state)
        .layer(CookieManagerLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub fn setup_config() -> Result<Config, ConfigError> {
    Config::from_env()
}

pub async fn setup_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url);
    opt.max_lifetime(std::time::Duration::from_secs(60))
        .sqlx_logging(false);

    if !db_url.starts_with("sqlite") {
        opt.min_connections(5).max_connections(100);
    }

    Database::connect(opt).await
}
