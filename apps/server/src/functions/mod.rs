//! Serverless-style functions hosted by this server.
//!
//! Each function is a stateless request handler under `/functions/v1`. They
//! answer CORS pre-flight themselves and report failures as `{"error": ...}`
//! rather than the API's structured error body.

pub mod send_bug_email;
pub mod template;

use actix_web::{http::StatusCode, web, HttpResponse, HttpResponseBuilder, ResponseError};
use serde::Serialize;

/// Headers attached to every function response
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Headers",
        "authorization, x-client-info, apikey, content-type",
    ),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
];

/// Per-deployment settings shared by the functions
#[derive(Debug, Clone)]
pub struct FunctionSettings {
    /// From-address for outgoing mail, e.g. `Bug Tracker <bugs@resend.dev>`
    pub from_address: String,
    /// Bearer token callers must present; `None` disables the check
    pub token: Option<String>,
}

#[derive(Serialize)]
struct FunctionErrorBody<'a> {
    error: &'a str,
}

/// Failure of a function invocation
#[derive(Debug, thiserror::Error)]
pub enum FunctionError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Failed(String),
}

impl ResponseError for FunctionError {
    fn status_code(&self) -> StatusCode {
        match self {
            FunctionError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            FunctionError::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        with_cors(HttpResponse::build(self.status_code())).json(FunctionErrorBody {
            error: &self.to_string(),
        })
    }
}

/// Adds [`CORS_HEADERS`] to a response builder
pub fn with_cors(mut builder: HttpResponseBuilder) -> HttpResponseBuilder {
    for header in CORS_HEADERS {
        builder.insert_header(header);
    }
    builder
}

/// OPTIONS handler: CORS headers, empty body
pub async fn preflight() -> HttpResponse {
    with_cors(HttpResponse::Ok()).finish()
}

/// Configure function routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/functions/v1").service(
            web::resource("/send-bug-email")
                .route(web::post().to(send_bug_email::handle))
                .route(web::method(actix_web::http::Method::OPTIONS).to(preflight)),
        ),
    );
}
