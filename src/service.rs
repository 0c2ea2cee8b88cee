//! Auth Orchestrator
//!
//! Registration, login, and the email-confirmation handshake. The service
//! composes the credential hasher, the token signer, the user directory and
//! the notification gateway; it holds no mutable state of its own, so
//! concurrent calls from different users need no coordination here.

use std::sync::Arc;

use crate::config::AuthConfig;
use crate::directory::UserDirectory;
use crate::error::AuthError;
use crate::gateway::NotificationGateway;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User, UserResponse};
use crate::password::PasswordHasher;
use crate::token::TokenSigner;

/// Authentication service
pub struct AuthService {
    directory: Arc<dyn UserDirectory>,
    gateway: Arc<dyn NotificationGateway>,
    hasher: PasswordHasher,
    signer: TokenSigner,
    config: AuthConfig,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        gateway: Arc<dyn NotificationGateway>,
        config: AuthConfig,
    ) -> Self {
        Self {
            hasher: PasswordHasher::new(&config),
            signer: TokenSigner::new(&config),
            directory,
            gateway,
            config,
        }
    }

    /// Get reference to config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Get reference to the token signer
    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    // ============================================
    // Registration
    // ============================================

    /// Register a new account and send the confirmation link.
    ///
    /// The user record is persisted before the confirmation email is
    /// dispatched; a delivery failure fails the whole operation but does
    /// not roll the record back, leaving an unconfirmed account in storage.
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResponse, AuthError> {
        if req.password.len() < self.config.min_password_length {
            return Err(AuthError::Validation(format!(
                "Password must be at least {} characters",
                self.config.min_password_length
            )));
        }

        if self.directory.find_by_email(&req.email).await?.is_some() {
            return Err(AuthError::EmailExists);
        }

        let password_hash = self.hasher.hash(&req.password)?;

        // Storage uniqueness stays the final authority if two registrations
        // race past the pre-check above.
        let user = self
            .directory
            .save(User::new(req.name, req.email, password_hash))
            .await?;

        let token = self.signer.issue_session(user.id)?;

        self.send_confirmation_link(&user.email).await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(AuthResponse {
            user: UserResponse::from(user),
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.config.session_token_expiration,
        })
    }

    // ============================================
    // Login
    // ============================================

    /// Authenticate with email and password.
    ///
    /// Unknown email and wrong password are reported identically so callers
    /// cannot enumerate accounts. Login does not require a confirmed email
    /// address; confirmation is advisory for now.
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, AuthError> {
        let user = self
            .directory
            .find_by_email(&req.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(&req.password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.signer.issue_session(user.id)?;

        tracing::debug!(user_id = %user.id, "User logged in");

        Ok(AuthResponse {
            user: UserResponse::from(user),
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.config.session_token_expiration,
        })
    }

    // ============================================
    // Email Confirmation
    // ============================================

    /// Confirm ownership of an email address.
    ///
    /// The token is not invalidated afterwards; repeating with the same
    /// unexpired token is an idempotent success.
    pub async fn confirm_email(&self, token: &str) -> Result<(), AuthError> {
        let claims = self.signer.verify_confirmation(token)?;

        // The token was validly signed by us, so a missing account is a
        // system inconsistency rather than a client error.
        let mut user = self
            .directory
            .find_by_email(&claims.email)
            .await?
            .ok_or_else(|| {
                AuthError::Inconsistency(format!("No account for confirmed email {}", claims.email))
            })?;

        user.email_validated = true;
        self.directory.save(user).await?;

        tracing::info!(email = %claims.email, "Email validated");

        Ok(())
    }

    async fn send_confirmation_link(&self, email: &str) -> Result<(), AuthError> {
        let token = self.signer.issue_confirmation(email)?;
        let link = format!("{}/auth/validate-email/{}", self.config.public_url, token);

        let html = format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 20px auto; padding: 20px;">
    <h1>Welcome to the catalog</h1>
    <p>Thanks for creating an account. Please confirm your email address to finish setting up.</p>
    <a href="{link}" style="display: inline-block; padding: 10px 20px; background-color: #007BFF; color: #fff; text-decoration: none; border-radius: 5px;">Confirm email</a>
</div>"#
        );

        let accepted = self
            .gateway
            .deliver(email, "Validate your email", &html)
            .await?;

        if !accepted {
            return Err(AuthError::Delivery(format!(
                "Confirmation email to {email} was not accepted"
            )));
        }

        Ok(())
    }
}
