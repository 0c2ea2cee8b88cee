//! Authentication Configuration
//!
//! All configuration values are loaded from environment variables.
//! No hardcoded secrets or sensitive data.

use crate::error::AuthError;
use std::env;

/// Authentication configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret key for signing tokens (from JWT_SECRET env var)
    pub jwt_secret: String,

    /// Issuer claim stamped into every token (from JWT_ISSUER env var)
    pub jwt_issuer: String,

    /// Session token lifetime in seconds (from SESSION_TOKEN_EXPIRATION env var)
    pub session_token_expiration: i64,

    /// Confirmation token lifetime in seconds (from CONFIRMATION_TOKEN_EXPIRATION env var)
    pub confirmation_token_expiration: i64,

    /// Argon2 memory cost in KiB (from ARGON2_MEMORY_COST env var)
    pub argon2_memory_cost: u32,

    /// Argon2 time cost (iterations) (from ARGON2_TIME_COST env var)
    pub argon2_time_cost: u32,

    /// Argon2 parallelism (from ARGON2_PARALLELISM env var)
    pub argon2_parallelism: u32,

    /// Minimum password length (from MIN_PASSWORD_LENGTH env var)
    pub min_password_length: usize,

    /// Base URL rendered into confirmation links (from PUBLIC_URL env var)
    pub public_url: String,

    /// SMTP relay host (from MAILER_HOST env var)
    pub mailer_host: String,

    /// Sender address, also the SMTP username (from MAILER_EMAIL env var)
    pub mailer_email: String,

    /// SMTP password (from MAILER_SECRET env var)
    pub mailer_secret: String,
}

impl AuthConfig {
    /// Load configuration from environment variables
    ///
    /// # Panics
    /// Panics if JWT_SECRET environment variable is not set
    pub fn from_env() -> Self {
        Self {
            jwt_secret: env::var("JWT_SECRET")
                .expect("JWT_SECRET environment variable must be set"),

            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "catalog-auth".to_string()),

            session_token_expiration: env::var("SESSION_TOKEN_EXPIRATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7200), // 2 hours

            confirmation_token_expiration: env::var("CONFIRMATION_TOKEN_EXPIRATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(86400), // 24 hours

            argon2_memory_cost: env::var("ARGON2_MEMORY_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(65536), // 64 MiB

            argon2_time_cost: env::var("ARGON2_TIME_COST")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),

            argon2_parallelism: env::var("ARGON2_PARALLELISM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4),

            min_password_length: env::var("MIN_PASSWORD_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(6),

            public_url: env::var("PUBLIC_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),

            mailer_host: env::var("MAILER_HOST")
                .unwrap_or_else(|_| "smtp.gmail.com".to_string()),

            mailer_email: env::var("MAILER_EMAIL").unwrap_or_default(),

            mailer_secret: env::var("MAILER_SECRET").unwrap_or_default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.jwt_secret.len() < 32 {
            return Err(AuthError::Config(
                "JWT_SECRET must be at least 32 characters".to_string(),
            ));
        }

        if self.session_token_expiration <= 0 {
            return Err(AuthError::Config(
                "SESSION_TOKEN_EXPIRATION must be positive".to_string(),
            ));
        }

        if self.confirmation_token_expiration <= 0 {
            return Err(AuthError::Config(
                "CONFIRMATION_TOKEN_EXPIRATION must be positive".to_string(),
            ));
        }

        if self.min_password_length < 6 {
            return Err(AuthError::Config(
                "MIN_PASSWORD_LENGTH must be at least 6".to_string(),
            ));
        }

        if self.public_url.is_empty() {
            return Err(AuthError::Config("PUBLIC_URL must be set".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "a".repeat(32),
            jwt_issuer: "test".to_string(),
            session_token_expiration: 7200,
            confirmation_token_expiration: 86400,
            argon2_memory_cost: 65536,
            argon2_time_cost: 3,
            argon2_parallelism: 4,
            min_password_length: 6,
            public_url: "http://localhost:3000".to_string(),
            mailer_host: "smtp.example.com".to_string(),
            mailer_email: "noreply@example.com".to_string(),
            mailer_secret: "secret".to_string(),
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_short_secret() {
        let mut config = base_config();
        config.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_nonpositive_expiration() {
        let mut config = base_config();
        config.session_token_expiration = 0;
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.confirmation_token_expiration = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_password_length_floor() {
        let mut config = base_config();
        config.min_password_length = 4;
        assert!(config.validate().is_err());
    }
}
