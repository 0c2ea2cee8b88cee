//! Authentication Middleware
//!
//! Session-token validation for protected routes. The signer comes from
//! shared state, so the secret is read once at startup rather than per
//! request.

use crate::error::AuthError;
use crate::handlers::AuthState;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

/// Validate the `Authorization: Bearer` session token and stash the decoded
/// claims in request extensions for extractors.
pub async fn require_auth(
    State(auth): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::InvalidToken)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidToken)?;

    let claims = auth.signer().verify_session(token)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
