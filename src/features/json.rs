use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::error::CmsError;

/// A `Json<T>` request body whose rejections become `CmsError::BadRequest`, so a
/// malformed body or a missing field answers 400 with the usual `{code, message}`.
pub struct CmsJson<T>(pub T);

impl<S, T> FromRequest<S> for CmsJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = CmsError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| CmsError::BadRequest(e.body_text()))?;
        Ok(CmsJson(value))
    }
}
