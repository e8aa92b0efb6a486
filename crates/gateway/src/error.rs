//! Error types for the gateway layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use taut_chatbot::{BotError, IdentityError};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Classifier error: {0}")]
    ClassifierError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// Body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::ClassifierError(_)
            | GatewayError::DatabaseError(_)
            | GatewayError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// What the caller gets to see; details stay in the logs.
    fn public_message(&self) -> &'static str {
        match self {
            GatewayError::InvalidRequest(_) => "Invalid request",
            _ => "Internal server error",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, "request rejected");
        }

        let body = ErrorResponse {
            error: status.as_str().to_string(),
            message: self.public_message().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<IdentityError> for GatewayError {
    fn from(error: IdentityError) -> Self {
        GatewayError::InvalidRequest(format!("X-User header: {error}"))
    }
}

impl From<BotError> for GatewayError {
    fn from(error: BotError) -> Self {
        match error {
            BotError::Store(error) => GatewayError::DatabaseError(error.to_string()),
            BotError::Classifier(error) => GatewayError::ClassifierError(error.to_string()),
            BotError::Identity(error) => error.into(),
        }
    }
}
