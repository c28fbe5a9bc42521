//! Error types for the moderation server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::moderation::ModerationError;

// == Guardian Error Enum ==
/// Unified error type for the moderation server.
#[derive(Error, Debug)]
pub enum GuardianError {
    /// Invalid request data
    #[error("{0}")]
    InvalidRequest(String),

    /// Missing or invalid credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Moderation provider failed or returned unusable output
    #[error("{0}")]
    Moderation(#[from] ModerationError),
}

// == IntoResponse Implementation ==
impl IntoResponse for GuardianError {
    fn into_response(self) -> Response {
        let status = match &self {
            GuardianError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GuardianError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GuardianError::Moderation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the moderation server.
pub type Result<T> = std::result::Result<T, GuardianError>;
