//! Resend transactional email API.
//!
//! `POST {api_url}/emails` with a bearer API key and a JSON body of
//! `from`, `to`, `subject` and `html`.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::{EmailSender, MailError, OutgoingEmail};

/// Error body returned by Resend on 4xx/5xx
#[derive(Deserialize)]
struct ResendErrorBody {
    message: Option<String>,
    name: Option<String>,
}

pub struct ResendMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ResendMailer {
    pub fn new(api_url: &str, api_key: &str) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| MailError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/emails", api_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl EmailSender for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(email)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MailError::Transport("Email provider timed out".to_string())
                } else {
                    MailError::Transport(format!("Email provider unreachable: {}", e))
                }
            })?;

        let status = response.status();
        if status.is_success() {
            log::debug!("Resend accepted email to {}", email.to);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ResendErrorBody>(&body) {
            Ok(ResendErrorBody {
                message: Some(message),
                ..
            }) => message,
            Ok(ResendErrorBody {
                name: Some(name), ..
            }) => name,
            _ if body.is_empty() => format!("HTTP {}", status.as_u16()),
            _ => format!("HTTP {}: {}", status.as_u16(), body),
        };

        Err(MailError::Provider(message))
    }

    fn provider(&self) -> &'static str {
        "resend"
    }
}
