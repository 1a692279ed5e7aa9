//! The create-then-notify flow behind "Report New Bug".
//!
//! Two sequential effects, no compensation: once the insert succeeds the bug
//! stays stored even if the notification fails. Callers get the stored bug
//! back inside [`SubmitError::Notification`] so they can tell the user the
//! report exists but the assignee was not emailed.

use std::sync::Arc;

use crate::error::AppError;
use crate::models::{BugReport, CreateBug, User};
use crate::services::bug::BugStore;
use crate::services::notification::{BugNotifier, NotifyError};

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Input rejected before anything was stored
    #[error("{0}")]
    Validation(String),

    /// The insert failed; nothing was stored and nobody was notified
    #[error("Failed to create bug report: {0}")]
    Persistence(#[source] AppError),

    /// The bug is stored but the notification failed
    #[error("{source}")]
    Notification {
        bug: Box<BugReport>,
        #[source]
        source: NotifyError,
    },
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Validation(msg) => AppError::Validation(msg),
            SubmitError::Persistence(inner) => inner,
            SubmitError::Notification { source, .. } => AppError::Notification(source.to_string()),
        }
    }
}

/// Orchestrates bug creation against injected collaborators
#[derive(Clone)]
pub struct BugSubmission {
    store: Arc<dyn BugStore>,
    notifier: Arc<dyn BugNotifier>,
}

impl BugSubmission {
    pub fn new(store: Arc<dyn BugStore>, notifier: Arc<dyn BugNotifier>) -> Self {
        Self { store, notifier }
    }

    /// Validates, stores with `created_by = actor.id`, then notifies the assignee.
    pub async fn submit(&self, actor: &User, input: CreateBug) -> Result<BugReport, SubmitError> {
        let input = input.validate().map_err(SubmitError::Validation)?;

        let mut bug = self
            .store
            .insert(&input, actor.id)
            .await
            .map_err(|e| {
                log::error!("Error creating bug for user {}: {}", actor.id, e);
                SubmitError::Persistence(e)
            })?;

        // The function emails whatever address the reporter typed
        bug.assigned_to = input.assigned_to;

        if let Err(source) = self.notifier.notify(&bug).await {
            log::error!(
                "Bug {} stored but assignee {} was not notified: {}",
                bug.id,
                bug.assigned_to,
                source
            );
            return Err(SubmitError::Notification {
                bug: Box::new(bug),
                source,
            });
        }

        log::info!("Bug {} reported and {} notified", bug.id, bug.assigned_to);
        Ok(bug)
    }
}
