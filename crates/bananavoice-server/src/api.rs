//! Shared API error type for the BananaVoice server.

use crate::sessions::SessionError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bananavoice_cost::CostError;
use thiserror::Error;

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<CostError> for ApiError {
    fn from(e: CostError) -> Self {
        match e {
            CostError::NoActiveSession => ApiError::Conflict(e.to_string()),
            CostError::DivisionByZero | CostError::InvalidArgument(_) => {
                ApiError::BadRequest(e.to_string())
            }
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::UnknownSession(_) => ApiError::NotFound(e.to_string()),
            SessionError::Cost(cost) => cost.into(),
            SessionError::RegistryFull(_) => ApiError::ServiceUnavailable(e.to_string()),
            SessionError::LockPoisoned => ApiError::InternalServerError(e.to_string()),
        }
    }
}
