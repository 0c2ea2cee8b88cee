//! Catalog Authentication Core
//!
//! Credential issuance and identity verification for the catalog API:
//! - User registration and login
//! - Signed, expiring session tokens (JWT)
//! - Argon2id password hashing
//! - Email-ownership confirmation via signed token links
//!
//! Persistent storage and mail transport sit behind the
//! [`directory::UserDirectory`] and [`gateway::NotificationGateway`] ports;
//! PostgreSQL and SMTP adapters are provided.
//!
//! # Configuration
//!
//! All configuration is loaded from environment variables:
//! - `JWT_SECRET` - secret for signing tokens (required, min 32 chars)
//! - `JWT_ISSUER` - issuer claim (default: "catalog-auth")
//! - `SESSION_TOKEN_EXPIRATION` - session token lifetime in seconds (default: 7200)
//! - `CONFIRMATION_TOKEN_EXPIRATION` - confirmation token lifetime in seconds (default: 86400)
//! - `PUBLIC_URL` - base URL rendered into confirmation links
//! - `MAILER_HOST`, `MAILER_EMAIL`, `MAILER_SECRET` - SMTP settings
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use catalog_auth::{AuthConfig, AuthService, PgUserDirectory, SmtpGateway};
//!
//! let config = AuthConfig::from_env();
//! config.validate()?;
//!
//! let directory = Arc::new(PgUserDirectory::new(pool));
//! directory.migrate().await?;
//! let gateway = Arc::new(SmtpGateway::from_config(&config)?);
//!
//! let auth = Arc::new(AuthService::new(directory, gateway, config));
//! let app = catalog_auth::create_routes(auth);
//! ```

pub mod config;
pub mod directory;
pub mod error;
pub mod extractors;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use config::AuthConfig;
pub use directory::{DirectoryError, PgUserDirectory, UserDirectory};
pub use error::AuthError;
pub use extractors::AuthUser;
pub use gateway::{GatewayError, NotificationGateway, SmtpGateway};
pub use handlers::{create_routes, AuthState};
pub use models::*;
pub use password::{HashError, PasswordHasher};
pub use service::AuthService;
pub use token::{ConfirmationClaims, SessionClaims, TokenError, TokenSigner};
