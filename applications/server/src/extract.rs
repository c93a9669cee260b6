/// Request extractors
use crate::error::ServerError;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use shelf_core::Validate;

/// JSON body that has passed [`Validate`].
///
/// A malformed body or a failed rule is rejected with 400 before the handler
/// runs; the handler receives the normalized value.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!("Rejected request body: {}", rejection.body_text());
            ServerError::BadRequest(rejection.body_text())
        })?;

        Ok(Self(value.validate()?))
    }
}
