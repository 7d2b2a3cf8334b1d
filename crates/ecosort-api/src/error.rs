//! Request-level error taxonomy.
//!
//! Each variant maps to a distinct status code so callers can tell a bad
//! upload from an unreadable image from a store outage. Bodies are always
//! `{"detail": <message>}`.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ecosort_ai::InferError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed upload.
    #[error("{0}")]
    BadRequest(String),
    /// The uploaded payload could not be decoded as an image.
    #[error("unreadable image: {0}")]
    Decode(String),
    /// The guide store was unreachable or the query failed.
    ///
    /// Only the diagnostic endpoint surfaces this; the classify route
    /// degrades store failures to "no guide found" instead.
    #[error("guide store failure: {0}")]
    Lookup(String),
    /// Inference failed or timed out.
    #[error("{0}")]
    Inference(String),
    /// Anything else.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Lookup(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Inference(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

impl From<InferError> for ApiError {
    fn from(err: InferError) -> Self {
        match err {
            InferError::Decode(msg) => Self::Decode(msg),
            InferError::Runtime(msg) => Self::Inference(msg),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::BadRequest(err.to_string())
    }
}
