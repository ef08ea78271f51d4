mod error;
mod extractor;
mod init;
mod middleware;

pub mod routers;

use serde::Serialize;

pub use error::ApiError;
pub use init::{setup_config, setup_db, setup_router};
pub use middleware::rate_limit::RateLimiter;

/// Envelope shared by every JSON response.
#[derive(Serialize, Debug)]
pub struct ApiResponse<T: Serialize> {
    success: bool,
    message: String,
    data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    fn new(success: bool, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success,
            message: message.into(),
            data,
        }
    }

    pub fn success(message: impl Into<String>, data: Option<T>) -> Self {
        Self::new(true, message, data)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(false, message, None)
    }

    /// An error carrying details, e.g. per-field validation failures.
    pub fn failure(message: impl Into<String>, data: T) -> Self {
        Self::new(false, message, Some(data))
    }
}
