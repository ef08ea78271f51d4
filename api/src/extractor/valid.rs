use axum::extract::{FromRequest, Request};
use validator::Validate;

use crate::error::ApiError;

/// Runs `validator` rules on the inner extractor's value before the handler sees it.
pub struct Valid<T>(pub T);

impl<S, T> FromRequest<S> for Valid<T>
where
    S: Send + Sync,
    T: FromRequest<S> + Validate,
    ApiError: From<T::Rejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = T::from_request(req, state).await?;
        value.validate()?;
        Ok(Valid(value))
    }
}
