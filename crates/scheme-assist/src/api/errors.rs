//! Error responses for the JSON endpoints.
//!
//! Bodies are `{"detail": "message"}`, where the message is already user-facing text in
//! the configured language.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    /// Query missing or too short (400).
    BadRequest(String),
    /// No scheme matched the query (404).
    NotFound(String),
    /// Body was not a JSON `{"query": ...}` object; keeps the extractor's status.
    InvalidBody(StatusCode, String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InvalidBody(status, msg) => (status, msg),
        };
        (status, axum::Json(json!({ "detail": detail }))).into_response()
    }
}
