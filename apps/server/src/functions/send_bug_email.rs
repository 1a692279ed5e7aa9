//! `POST /functions/v1/send-bug-email`
//!
//! Body: `{"bugData": {title, description, priority, assigned_to, status, ...}}`.
//! Renders the bug email and sends it to `assigned_to`. Any failure, including
//! an unparseable body, is a 500 with `{"error": message}`.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use super::template::{self, BugEmailData};
use super::{with_cors, FunctionError, FunctionSettings};
use crate::auth::FunctionAuth;
use crate::services::mailer::{EmailSender, OutgoingEmail};
use crate::services::notification::NotifyRequest;

#[derive(Serialize, Deserialize)]
pub struct SendBugEmailResponse {
    pub message: String,
}

/// Parses the payload and builds the email without sending it
pub fn prepare(from: &str, body: &[u8]) -> Result<OutgoingEmail, FunctionError> {
    let request: NotifyRequest<BugEmailData> = serde_json::from_slice(body)
        .map_err(|e| FunctionError::Failed(format!("Invalid request body: {}", e)))?;
    let bug = request.bug_data;

    Ok(OutgoingEmail {
        from: from.to_string(),
        to: bug.assigned_to.clone(),
        subject: template::subject(&bug.title),
        html: template::render_html(&bug),
    })
}

pub async fn handle(
    _auth: FunctionAuth,
    body: web::Bytes,
    settings: web::Data<FunctionSettings>,
    mailer: web::Data<dyn EmailSender>,
) -> Result<HttpResponse, FunctionError> {
    let email = prepare(&settings.from_address, &body)?;

    mailer.send(&email).await.map_err(|e| {
        log::error!(
            "send-bug-email: {} failed for {}: {}",
            mailer.provider(),
            email.to,
            e
        );
        FunctionError::Failed(e.to_string())
    })?;

    log::info!("send-bug-email: notified {} ({})", email.to, email.subject);

    Ok(with_cors(HttpResponse::Ok()).json(SendBugEmailResponse {
        message: "Email sent successfully".to_string(),
    }))
}
