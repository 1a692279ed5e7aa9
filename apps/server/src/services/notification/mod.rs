//! Outbound notification for newly created bugs.
//!
//! The submission flow depends on the [`BugNotifier`] trait only. The
//! production implementation, [`FunctionNotifier`], POSTs the bug to the
//! `send-bug-email` function over HTTP.

pub mod function;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::BugReport;

pub use function::FunctionNotifier;

/// Message shown when the function fails without saying why
pub const FALLBACK_NOTIFY_ERROR: &str = "Failed to send email notification";

/// Request body understood by the notification function
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyRequest<T> {
    pub bug_data: T,
}

/// Why a notification could not be delivered
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifyError {
    /// The function could not be reached or its response could not be read
    #[error("{0}")]
    Transport(String),

    /// The function answered with a non-success status
    #[error("{message}")]
    Rejected { status: u16, message: String },
}

/// Sends the "new bug" notification for a persisted bug
#[async_trait]
pub trait BugNotifier: Send + Sync {
    async fn notify(&self, bug: &BugReport) -> Result<(), NotifyError>;
}
