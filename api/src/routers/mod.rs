use std::time::Duration;

use axum::{Router, middleware::from_fn_with_state};

pub mod admin;
pub mod auth;
pub mod b2b;
pub mod b2c;
pub mod health;
pub mod organiser;
pub mod payment;
pub mod player;
pub mod report;
pub mod team;
pub mod tournament;

use app::state::AppState;

use crate::middleware::{
    identify::identify,
    rate_limit::{RateLimiter, rate_limit},
};

/// Requests allowed per client on each public router within one window.
pub const PUBLIC_RATE_LIMIT: u32 = 25;
pub const PUBLIC_RATE_WINDOW: Duration = Duration::from_secs(300);

fn public_limiter() -> RateLimiter {
    RateLimiter::new(PUBLIC_RATE_LIMIT, PUBLIC_RATE_WINDOW)
}

pub fn create_router(state: AppState) -> Router {
    let b2b = b2b::create_b2b_router().layer(from_fn_with_state(public_limiter(), rate_limit));
    let b2c = b2c::create_b2c_router().layer(from_fn_with_state(public_limiter(), rate_limit));

    Router::new()
        .nest("/auth", auth::create_auth_router())
        .nest("/api/player", player::create_player_router())
        .nest("/api/organiser", organiser::create_organiser_router())
        .nest("/api/tournament", tournament::create_tournament_router())
        .nest("/api/team", team::create_team_router())
        .nest("/api/report", report::create_report_router())
        .nest("/api/payment", payment::create_payment_router())
        .nest("/admin", admin::create_admin_router())
        .nest("/b2b", b2b)
        .nest("/b2c", b2c)
        .nest("/health", health::create_health_router())
        .layer(from_fn_with_state(state.clone(), identify))
        .with_state(state)
}
