//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Errors surfaced to the webhook caller.
///
/// Only two domain failures reach this type: credential resolution
/// (`Unauthorized`, 401 so the sender knows the grant is gone) and timeline
/// insert failures (`BadGateway`, a real downstream outage worth
/// signaling). Everything else the dispatcher absorbs as a logged no-op.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    BadGateway(String),
    Internal(String),
}

impl From<helio_core::Error> for ApiError {
    fn from(err: helio_core::Error) -> Self {
        match err {
            helio_core::Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            helio_core::Error::InsertFailed(msg) => ApiError::BadGateway(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
