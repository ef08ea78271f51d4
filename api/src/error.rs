use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::ValidationErrors;

use app::error::AppError;

use crate::ApiResponse;

/// Any failure leaving a handler. Domain errors keep their status code; anything
/// unexpected is logged and answered with a bare 500.
#[derive(Debug)]
pub struct ApiError(pub anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

fn reply(code: StatusCode, message: &str) -> Response {
    (code, Json(ApiResponse::<()>::error(message))).into_response()
}

fn internal(err: &dyn std::fmt::Display) -> Response {
    tracing::error!(error = %err, "Request failed");
    reply(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self.0.downcast::<AppError>() {
            Ok(err) if err.is_public() => return reply(err.code(), &err.to_string()),
            Ok(err) => return internal(&err),
            Err(err) => err,
        };
        let err = match err.downcast::<ValidationErrors>() {
            Ok(errors) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::failure("Validation error", errors)),
                )
                    .into_response();
            }
            Err(err) => err,
        };
        let err = match err.downcast::<JsonRejection>() {
            Ok(rejection) => return reply(StatusCode::BAD_REQUEST, &rejection.body_text()),
            Err(err) => err,
        };
        let err = match err.downcast::<QueryRejection>() {
            Ok(rejection) => return reply(StatusCode::BAD_REQUEST, &rejection.body_text()),
            Err(err) => err,
        };
        let err = match err.downcast::<PathRejection>() {
            Ok(rejection) => return reply(StatusCode::BAD_REQUEST, &rejection.body_text()),
            Err(err) => err,
        };
        internal(&err)
    }
}
