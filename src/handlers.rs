//! HTTP Handlers
//!
//! REST endpoints over the auth service. Request DTOs are validated here,
//! before they reach the orchestrator.

use crate::error::AuthError;
use crate::extractors::AuthUser;
use crate::middleware;
use crate::models::{LoginRequest, MessageResponse, RegisterRequest};
use crate::service::AuthService;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware as axum_middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use validator::Validate;

/// Shared auth service state
pub type AuthState = Arc<AuthService>;

/// Create authentication routes
pub fn create_routes(auth: AuthState) -> Router {
    let public = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/validate-email/:token", get(validate_email));

    let protected = Router::new()
        .route("/auth/me", get(current_user))
        .layer(axum_middleware::from_fn_with_state(
            auth.clone(),
            middleware::require_auth,
        ));

    Router::new().merge(public).merge(protected).with_state(auth)
}

/// POST /auth/register
///
/// Register a new user account and dispatch the confirmation email.
pub async fn register(
    State(auth): State<AuthState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AuthError> {
    req.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let response = auth.register(req).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /auth/login
///
/// Authenticate and return a session token
pub async fn login(
    State(auth): State<AuthState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthError> {
    req.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let response = auth.login(req).await?;

    Ok(Json(response))
}

/// GET /auth/validate-email/:token
///
/// Target of the link sent at registration.
pub async fn validate_email(
    State(auth): State<AuthState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AuthError> {
    auth.confirm_email(&token).await?;

    Ok(Json(MessageResponse::new("Email validated")))
}

/// GET /auth/me
///
/// Identify the authenticated subject
pub async fn current_user(user: AuthUser) -> impl IntoResponse {
    Json(serde_json::json!({ "id": user.id }))
}
