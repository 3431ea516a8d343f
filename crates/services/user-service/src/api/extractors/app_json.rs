//! JSON body extractor with uniform error responses.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use common::AppError;

/// JSON extractor that turns malformed bodies into `400 BAD_REQUEST`.
///
/// Field rules are not checked here; the domain factory owns them.
///
/// # Example
///
/// ```rust,ignore
/// async fn create_user(AppJson(payload): AppJson<CreateUserRequest>) {
///     // payload is well-formed JSON of the right shape
/// }
/// ```
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        Ok(AppJson(value))
    }
}
