//! Request Extractors

use crate::error::AuthError;
use crate::token::SessionClaims;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

/// Authenticated subject, extracted from the session-token claims stored by
/// [`crate::middleware::require_auth`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<SessionClaims>()
            .ok_or(AuthError::InvalidToken)?;

        Ok(AuthUser { id: claims.sub })
    }
}
