//! SMTP delivery via lettre.
//!
//! Port 465 uses implicit TLS, anything else STARTTLS.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{EmailSender, MailError, OutgoingEmail};

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(
        host: &str,
        port: u16,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self, MailError> {
        let builder = if port == 465 {
            let tls_params = TlsParameters::new(host.to_string()).map_err(|e| {
                MailError::Config(format!("Invalid TLS parameters for SMTP host: {}", e))
            })?;
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                .map_err(|e| MailError::Config(format!("Invalid SMTP host: {}", e)))?
                .port(port)
                .tls(Tls::Wrapper(tls_params))
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .map_err(|e| MailError::Config(format!("Invalid SMTP host: {}", e)))?
                .port(port)
        };

        let transport = match (username, password) {
            (Some(username), Some(password)) => builder
                .credentials(Credentials::new(username, password))
                .build(),
            _ => builder.build(),
        };

        Ok(Self { transport })
    }
}

/// Builds the MIME message for an outgoing email
pub fn build_message(email: &OutgoingEmail) -> Result<Message, MailError> {
    let from: Mailbox = email
        .from
        .parse()
        .map_err(|e| MailError::Config(format!("Invalid from address {}: {}", email.from, e)))?;
    let to: Mailbox = email
        .to
        .parse()
        .map_err(|e| MailError::Message(format!("Invalid recipient {}: {}", email.to, e)))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(&email.subject)
        .header(ContentType::TEXT_HTML)
        .body(email.html.clone())
        .map_err(|e| MailError::Message(format!("Failed to build email: {}", e)))
}

#[async_trait]
impl EmailSender for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = build_message(email)?;

        self.transport.send(message).await.map_err(|e| {
            MailError::Transport(format!("Failed to send email to {}: {}", email.to, e))
        })?;

        log::debug!("Email sent via SMTP to {}", email.to);
        Ok(())
    }

    fn provider(&self) -> &'static str {
        "smtp"
    }
}
