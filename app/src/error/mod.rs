use axum::http::StatusCode;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failures raised by domain operations. Each variant maps to one HTTP status.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// The payment gateway rejected or failed a call.
    #[error("Payment gateway error: {0}")]
    Gateway(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("Too many requests, please try again later")]
    RateLimited,

    #[error(transparent)]
    Db(#[from] DbErr),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Gateway(_) => StatusCode::BAD_GATEWAY,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Db(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the message may be shown to the caller as is.
    pub fn is_public(&self) -> bool {
        !matches!(self, Self::Db(_) | Self::Internal(_))
    }
}

/// Turns a unique-constraint violation into a `Conflict` with `message`; other
/// database errors pass through.
pub fn unique_violation(err: DbErr, message: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict(message),
        _ => AppError::Db(err),
    }
}

pub type AppResult<T> = Result<T, AppError>;
