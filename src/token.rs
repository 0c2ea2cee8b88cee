//! Token Signer
//!
//! Signed, expiring tokens carrying one of two typed claim shapes: session
//! tokens identify a subject, confirmation tokens identify an email address
//! awaiting verification. The issuing operation determines which shape a
//! token is decoded as; there is no runtime shape-guessing.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;

#[derive(Debug, Clone, thiserror::Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,

    /// Signature checks out but the claims are not the expected shape.
    #[error("Token claims do not match the expected shape")]
    MalformedClaims,

    #[error("Failed to sign token")]
    Signing,
}

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: Uuid,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

/// Claims carried by an email-confirmation token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationClaims {
    /// Address awaiting verification
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

/// Issues and validates signed, expiring tokens.
///
/// Keys are built once from the process-wide secret and never mutated;
/// rotating the secret invalidates every previously issued token.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    session_ttl: Duration,
    confirmation_ttl: Duration,
}

impl TokenSigner {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.jwt_issuer.clone(),
            session_ttl: Duration::seconds(config.session_token_expiration),
            confirmation_ttl: Duration::seconds(config.confirmation_token_expiration),
        }
    }

    /// Issue a session token for a user
    pub fn issue_session(&self, user_id: Uuid) -> Result<String, TokenError> {
        let now = Utc::now();
        self.sign(&SessionClaims {
            sub: user_id,
            iat: now.timestamp(),
            exp: (now + self.session_ttl).timestamp(),
            iss: self.issuer.clone(),
        })
    }

    /// Issue a confirmation token for an email address
    pub fn issue_confirmation(&self, email: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        self.sign(&ConfirmationClaims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.confirmation_ttl).timestamp(),
            iss: self.issuer.clone(),
        })
    }

    /// Validate a session token and return its claims
    pub fn verify_session(&self, token: &str) -> Result<SessionClaims, TokenError> {
        self.decode(token)
    }

    /// Validate a confirmation token and return its claims
    pub fn verify_confirmation(&self, token: &str) -> Result<ConfirmationClaims, TokenError> {
        self.decode(token)
    }

    fn sign<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|_| TokenError::Signing)
    }

    fn decode<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        // Zero leeway so expiry is reported as expiry, not tolerated.
        validation.leeway = 0;

        let data = decode::<C>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::Json(_) => TokenError::MalformedClaims,
            _ => {
                tracing::debug!("Token validation failed: {:?}", err);
                TokenError::Invalid
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_signer() -> TokenSigner {
        let config = AuthConfig {
            jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
            jwt_issuer: "test".to_string(),
            session_token_expiration: 7200,
            confirmation_token_expiration: 86400,
            argon2_memory_cost: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
            min_password_length: 6,
            public_url: "http://localhost:3000".to_string(),
            mailer_host: "localhost".to_string(),
            mailer_email: "noreply@example.com".to_string(),
            mailer_secret: String::new(),
        };
        TokenSigner::new(&config)
    }

    fn tamper(token: &str) -> String {
        let mut tampered = token.to_string();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        tampered
    }

    #[test]
    fn session_claims_round_trip() {
        let signer = test_signer();
        let user_id = Uuid::new_v4();

        let token = signer.issue_session(user_id).unwrap();
        let claims = signer.verify_session(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.iss, "test");
        assert_eq!(claims.exp - claims.iat, 7200);
    }

    #[test]
    fn confirmation_claims_round_trip() {
        let signer = test_signer();

        let token = signer.issue_confirmation("ana@x.com").unwrap();
        let claims = signer.verify_confirmation(&token).unwrap();

        assert_eq!(claims.email, "ana@x.com");
        assert_eq!(claims.exp - claims.iat, 86400);
    }

    #[test]
    fn tampered_signature_is_invalid() {
        let signer = test_signer();
        let token = signer.issue_session(Uuid::new_v4()).unwrap();

        let err = signer.verify_session(&tamper(&token)).unwrap_err();
        assert!(matches!(err, TokenError::Invalid));
    }

    #[test]
    fn garbage_input_is_invalid_not_a_panic() {
        let signer = test_signer();
        assert!(matches!(
            signer.verify_session("definitely.not.a-token").unwrap_err(),
            TokenError::Invalid
        ));
        assert!(matches!(
            signer.verify_confirmation("").unwrap_err(),
            TokenError::Invalid
        ));
    }

    #[test]
    fn expired_token_reports_expiry_not_invalidity() {
        let signer = test_signer();
        let now = Utc::now();
        let expired = signer
            .sign(&SessionClaims {
                sub: Uuid::new_v4(),
                iat: (now - Duration::seconds(120)).timestamp(),
                exp: (now - Duration::seconds(60)).timestamp(),
                iss: "test".to_string(),
            })
            .unwrap();

        let err = signer.verify_session(&expired).unwrap_err();
        assert!(matches!(err, TokenError::Expired));
    }

    #[test]
    fn claim_shapes_do_not_cross_decode() {
        let signer = test_signer();

        let session = signer.issue_session(Uuid::new_v4()).unwrap();
        assert!(matches!(
            signer.verify_confirmation(&session).unwrap_err(),
            TokenError::MalformedClaims
        ));

        let confirmation = signer.issue_confirmation("ana@x.com").unwrap();
        assert!(matches!(
            signer.verify_session(&confirmation).unwrap_err(),
            TokenError::MalformedClaims
        ));
    }

    #[test]
    fn foreign_issuer_is_rejected() {
        let signer = test_signer();
        let mut other_config_signer = test_signer();
        other_config_signer.issuer = "someone-else".to_string();

        let token = other_config_signer.issue_session(Uuid::new_v4()).unwrap();
        assert!(matches!(
            signer.verify_session(&token).unwrap_err(),
            TokenError::Invalid
        ));
    }
}
