//! HTTP error responses
//!
//! The JSON API answers with `{"error": ...}` bodies, the HTML pages with
//! plain text. Store failures are logged and reported as 500 on both.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tasklist_core::{ErrorBody, StoreError};
use thiserror::Error;

pub const TASK_NOT_FOUND: &str = "Task not found";
pub const CONTENT_REQUIRED: &str = "Task content is required";

/// Error returned by the `/api` handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Task not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn content_required() -> Self {
        ApiError::BadRequest(CONTENT_REQUIRED.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, TASK_NOT_FOUND.to_string()),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Store(e) => {
                tracing::error!("Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody::new(message))).into_response()
    }
}

/// Error returned by the HTML page handlers
#[derive(Error, Debug)]
pub enum PageError {
    #[error("Task not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => (StatusCode::NOT_FOUND, TASK_NOT_FOUND).into_response(),
            PageError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            other => {
                tracing::error!("Page error: {}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
