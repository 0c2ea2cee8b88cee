//! Notification Gateway
//!
//! Delivery port for outbound messages plus the SMTP adapter used in
//! production. Callers treat a `false` acceptance and a transport error
//! identically.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::AuthConfig;
use crate::error::AuthError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    #[error("Invalid recipient address: {0}")]
    Address(String),

    #[error("Failed to build message: {0}")]
    Message(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Deliver-a-message-to-an-address capability
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Deliver a message; `Ok(true)` means accepted for delivery.
    async fn deliver(&self, to: &str, subject: &str, html_body: &str)
        -> Result<bool, GatewayError>;
}

/// SMTP-backed gateway
pub struct SmtpGateway {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpGateway {
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.mailer_host)
            .map_err(|e| AuthError::Config(format!("Invalid SMTP relay: {e}")))?
            .credentials(Credentials::new(
                config.mailer_email.clone(),
                config.mailer_secret.clone(),
            ))
            .build();

        let from = config
            .mailer_email
            .parse()
            .map_err(|_| AuthError::Config("Invalid MAILER_EMAIL address".to_string()))?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl NotificationGateway for SmtpGateway {
    async fn deliver(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<bool, GatewayError> {
        let to: Mailbox = to.parse().map_err(|_| GatewayError::Address(to.to_string()))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| GatewayError::Message(e.to_string()))?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(response.is_positive())
    }
}
