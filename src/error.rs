//! Authentication Error Types
//!
//! Centralized error handling for all authentication operations. Every
//! failure is classified as exactly one variant at the operation boundary;
//! internal-class variants render a generic response while the detail goes
//! to the operator log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::directory::DirectoryError;
use crate::gateway::GatewayError;
use crate::password::HashError;
use crate::token::TokenError;

/// Authentication errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Email already registered")]
    EmailExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Failed to sign token")]
    Signing,

    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Inconsistent state: {0}")]
    Inconsistency(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error")]
    Internal,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            AuthError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            AuthError::EmailExists => (StatusCode::CONFLICT, "email_exists", self.to_string()),
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                self.to_string(),
            ),
            AuthError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "invalid_token", self.to_string())
            }
            AuthError::Signing
            | AuthError::Delivery(_)
            | AuthError::Database(_)
            | AuthError::Inconsistency(_)
            | AuthError::Config(_)
            | AuthError::Internal => {
                tracing::error!(error = %self, "Internal auth failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        (
            status,
            Json(serde_json::json!({
                "error": error_code,
                "message": message
            })),
        )
            .into_response()
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired | TokenError::Invalid => AuthError::InvalidToken,
            // A validly signed token with the wrong claim shape is our bug,
            // not the client's.
            TokenError::MalformedClaims => {
                tracing::error!("Token carried unexpected claims");
                AuthError::Internal
            }
            TokenError::Signing => AuthError::Signing,
        }
    }
}

impl From<DirectoryError> for AuthError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::DuplicateEmail => AuthError::EmailExists,
            DirectoryError::Backend(msg) => AuthError::Database(msg),
        }
    }
}

impl From<GatewayError> for AuthError {
    fn from(err: GatewayError) -> Self {
        tracing::error!("Delivery error: {:?}", err);
        AuthError::Delivery(err.to_string())
    }
}

impl From<HashError> for AuthError {
    fn from(err: HashError) -> Self {
        tracing::error!("Password hashing error: {:?}", err);
        AuthError::Internal
    }
}
