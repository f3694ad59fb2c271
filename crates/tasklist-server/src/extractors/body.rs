//! Body extractors
//!
//! axum's own `Json` and `Form` reject with 415/422 and their own text. These
//! wrappers turn every unreadable body into a 400 in the surface's format. A
//! well-formed JSON body of the wrong shape reads as missing task content.

use crate::error::{ApiError, PageError};
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Form, Json,
};
use serde::de::DeserializeOwned;

/// JSON body for the `/api` routes
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(JsonRejection::JsonDataError(err)) => {
                tracing::debug!("JSON body has the wrong shape: {}", err.body_text());
                Err(ApiError::content_required())
            }
            Err(rejection) => {
                tracing::debug!("Rejected JSON body: {}", rejection.body_text());
                Err(ApiError::BadRequest(rejection.body_text()))
            }
        }
    }
}

/// URL-encoded form body for the HTML routes
pub struct PageForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for PageForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = PageError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<T>::from_request(req, state).await {
            Ok(Form(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!("Rejected form body: {}", rejection.body_text());
                Err(PageError::BadRequest(rejection.body_text()))
            }
        }
    }
}
