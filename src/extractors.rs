// extractors.rs
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
};
use serde::de::DeserializeOwned;

use crate::error::HttpError;

/// `axum::Json` whose rejections are rendered as `HttpError`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(HttpError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` whose rejections are rendered as `HttpError`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(HttpError))]
pub struct AppPath<T>(pub T);

/// JSON body that may be left out entirely. An empty body yields
/// `T::default()`; a body that is present must parse.
pub struct JsonOrDefault<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrDefault<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::bad_request(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonOrDefault(T::default()));
        }

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            HttpError::bad_request(format!("Failed to parse the request body: {}", e))
        })?;

        Ok(JsonOrDefault(value))
    }
}
