//! JSON body extractor whose rejections are rendered in the request locale.

use axum::extract::{FromRequest, OptionalFromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::{AppError, LocalizedError};
use crate::middleware::locale::locale_of;

/// Like [`Json`], but a missing content type, malformed JSON or a
/// mismatched shape answers with a localized `400 BAD_REQUEST`.
///
/// As `Option<LocalizedJson<T>>` it yields `None` for a request without a
/// body content type.
#[derive(Debug, Clone)]
pub struct LocalizedJson<T>(pub T);

impl<S, T> FromRequest<S> for LocalizedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = LocalizedError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let locale = locale_of(req.uri(), req.headers());
        match <Json<T> as FromRequest<S>>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::from(rejection).localized(locale, None)),
        }
    }
}

impl<S, T> OptionalFromRequest<S> for LocalizedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = LocalizedError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        if !req.headers().contains_key(CONTENT_TYPE) {
            return Ok(None);
        }
        <Self as FromRequest<S>>::from_request(req, state)
            .await
            .map(Some)
    }
}
