use axum::{extract::FromRequestParts, http::request::Parts};

use app::error::AppError;
use models::schemas::auth::{AuthSchema, Principal, Role};

use crate::error::ApiError;

fn authenticated(parts: &Parts) -> Result<Principal, AppError> {
    let principal = parts
        .extensions
        .get::<AuthSchema>()
        .and_then(|auth| auth.principal.clone())
        .ok_or_else(|| AppError::unauthorized("Authentication required"))?;
    if principal.banned {
        return Err(AppError::forbidden("Account is banned"));
    }
    Ok(principal)
}

fn with_role(parts: &Parts, role: Role) -> Result<Principal, AppError> {
    let principal = authenticated(parts)?;
    if principal.role != role {
        return Err(AppError::forbidden(format!(
            "This action requires the {role} role"
        )));
    }
    Ok(principal)
}

macro_rules! role_extractor {
    ($(#[$doc:meta])* $name:ident, $role:expr) => {
        $(#[$doc])*
        pub struct $name(pub Principal);

        impl<S: Send + Sync> FromRequestParts<S> for $name {
            type Rejection = ApiError;

            async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
                Ok(Self(with_role(parts, $role)?))
            }
        }
    };
}

role_extractor!(
    /// A signed-in, unbanned player.
    PlayerAuth,
    Role::Player
);
role_extractor!(OrganiserAuth, Role::Organiser);
role_extractor!(AdminAuth, Role::Admin);

/// Any signed-in, unbanned principal.
pub struct AnyAuth(pub Principal);

impl<S: Send + Sync> FromRequestParts<S> for AnyAuth {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(authenticated(parts)?))
    }
}
