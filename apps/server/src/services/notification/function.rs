//! HTTP client for the `send-bug-email` function.
//!
//! Sends `{"bugData": ...}` with a bearer token. Any non-2xx answer is turned
//! into [`NotifyError::Rejected`] carrying the function's `error` field.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::{BugNotifier, NotifyError, NotifyRequest, FALLBACK_NOTIFY_ERROR};
use crate::config::FunctionsConfig;
use crate::models::BugReport;

#[derive(Deserialize)]
struct FunctionErrorBody {
    error: Option<String>,
}

/// Calls the notification function over HTTP
pub struct FunctionNotifier {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl FunctionNotifier {
    /// Creates a notifier targeting `url` (the full function URL)
    pub fn new(url: impl Into<String>, token: Option<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            token,
        })
    }

    pub fn from_config(config: &FunctionsConfig) -> Result<Self, reqwest::Error> {
        Self::new(config.send_bug_email_url(), config.token.clone())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Picks the message out of an error response, falling back to a fixed text
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<FunctionErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| FALLBACK_NOTIFY_ERROR.to_string())
}

#[async_trait]
impl BugNotifier for FunctionNotifier {
    async fn notify(&self, bug: &BugReport) -> Result<(), NotifyError> {
        let mut request = self
            .client
            .post(&self.url)
            .json(&NotifyRequest { bug_data: bug });

        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                "Notification request timed out".to_string()
            } else if e.is_connect() {
                "Could not connect to notification function".to_string()
            } else {
                format!("Notification request failed: {}", e)
            };
            log::warn!("Notification for bug {} failed: {}", bug.id, message);
            NotifyError::Transport(message)
        })?;

        let status = response.status();
        if status.is_success() {
            log::debug!("Notification for bug {} accepted ({})", bug.id, status);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = rejection_message(&body);
        log::warn!(
            "Notification function rejected bug {}: HTTP {} {}",
            bug.id,
            status.as_u16(),
            message
        );

        Err(NotifyError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
