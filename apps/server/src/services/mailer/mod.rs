//! Email delivery for the notification function.
//!
//! A small strategy layer: the function renders an [`OutgoingEmail`] and hands
//! it to whichever [`EmailSender`] the configuration selected.

pub mod resend;
pub mod smtp;

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use crate::config::{EmailConfig, EmailProviderConfig};

pub use resend::ResendMailer;
pub use smtp::SmtpMailer;

/// A fully rendered message ready for the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// Provider settings are unusable (bad host, bad from-address)
    #[error("Invalid email configuration: {0}")]
    Config(String),

    /// The message itself could not be built (e.g. malformed recipient)
    #[error("{0}")]
    Message(String),

    /// The provider could not be reached
    #[error("{0}")]
    Transport(String),

    /// The provider refused the message
    #[error("{0}")]
    Provider(String),
}

/// Delivers a rendered email through a third-party provider
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;

    /// Short provider name for logs
    fn provider(&self) -> &'static str;
}

/// Builds the sender selected by `EMAIL_PROVIDER`
pub fn create_mailer(config: &EmailConfig) -> Result<Arc<dyn EmailSender>, MailError> {
    match &config.provider {
        EmailProviderConfig::Resend { api_key, api_url } => {
            Ok(Arc::new(ResendMailer::new(api_url.as_str(), api_key)?))
        }
        EmailProviderConfig::Smtp {
            host,
            port,
            username,
            password,
        } => Ok(Arc::new(SmtpMailer::new(
            host,
            *port,
            username.clone(),
            password.clone(),
        )?)),
    }
}
