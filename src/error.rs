//! Error types for the relay
//!
//! Every terminal failure is mapped to one of a small set of client-visible
//! kinds. Backend error bodies, transport error strings, and the credential
//! never cross the trust boundary to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Request body is not valid JSON")]
    MalformedRequest,

    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),

    #[error("Generation backend is unavailable")]
    BackendUnavailable,

    #[error("Generation backend returned an error")]
    BackendError,

    #[error("Server configuration error: {0}")]
    ConfigurationError(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error details
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match &self {
            RelayError::MalformedRequest => (
                StatusCode::BAD_REQUEST,
                "MalformedRequest",
                self.to_string(),
            ),
            RelayError::InvalidPrompt(_) => (
                StatusCode::BAD_REQUEST,
                "InvalidPrompt",
                self.to_string(),
            ),
            RelayError::BackendUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "BackendUnavailable",
                "Generation service is temporarily unavailable, please try again".to_string(),
            ),
            RelayError::BackendError => (
                StatusCode::BAD_GATEWAY,
                "BackendError",
                "Failed to generate a recipe".to_string(),
            ),
            // Operational misconfiguration; the detail stays server-side
            RelayError::ConfigurationError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "ConfigurationError",
                "Service is misconfigured".to_string(),
            ),
            RelayError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError",
                "Internal server error".to_string(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                kind: kind.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for convenience
pub type RelayResult<T> = Result<T, RelayError>;
