use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;

use app::{persistence::auth::resolve_principal, state::AppState, utils::jwt::decode_data};
use models::schemas::auth::{AuthSchema, TokenSubject};

use crate::error::ApiError;

pub const TOKEN_COOKIE: &str = "token";

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(|token| token.trim().to_owned())
}

/// Attaches an [`AuthSchema`] to every request. The caller is anonymous when no
/// valid token is presented; role checks happen in the extractors.
pub async fn identify(
    State(state): State<AppState>,
    cookies: Cookies,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())
        .or_else(|| cookies.get(TOKEN_COOKIE).map(|c| c.value().to_owned()));

    let principal = match token {
        Some(token) => match decode_data::<TokenSubject>(&state.config, &token) {
            Ok(subject) => resolve_principal(&state.conn, &subject).await?,
            Err(e) => {
                tracing::debug!("Ignoring invalid token: {}", e);
                None
            }
        },
        None => None,
    };

    req.extensions_mut().insert(AuthSchema { principal });

    Ok(next.run(req).await)
}
