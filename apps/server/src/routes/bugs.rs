use actix_cors::Cors;
use actix_web::{http::header, web, HttpResponse, ResponseError};
use serde::Serialize;

use crate::auth::AuthenticatedUser;
use crate::error::{AppError, AppResult, ErrorDetail};
use crate::models::{BugReport, CreateBug};
use crate::services::{BugStore, BugSubmission, SubmitError};

#[derive(Serialize)]
struct BugResponse {
    bug: BugReport,
}

/// Body of a 502: the bug exists, the assignee was not notified
#[derive(Serialize)]
struct NotificationFailedResponse {
    error: ErrorDetail,
    bug: BugReport,
}

/// GET /api/bugs
/// All bugs, newest first
pub async fn list_bugs(store: web::Data<dyn BugStore>) -> AppResult<HttpResponse> {
    let bugs = store.list_recent_first().await?;
    Ok(HttpResponse::Ok().json(bugs))
}

/// POST /api/bugs
/// Store a bug as the signed-in user, then email the assignee
pub async fn create_bug(
    submission: web::Data<BugSubmission>,
    body: web::Json<CreateBug>,
    user: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    match submission.submit(&user.0, body.into_inner()).await {
        Ok(bug) => Ok(HttpResponse::Created().json(BugResponse { bug })),
        Err(SubmitError::Notification { bug, source }) => {
            // The function's own message, without the AppError prefix
            let message = source.to_string();
            let err = AppError::Notification(message.clone());
            Ok(HttpResponse::build(err.status_code()).json(NotificationFailedResponse {
                error: ErrorDetail {
                    error_type: err.error_type().to_string(),
                    message,
                },
                bug: *bug,
            }))
        }
        Err(e) => Err(e.into()),
    }
}

/// CORS policy for the JSON API
fn api_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600)
}

/// Configure bug API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/bugs")
            .wrap(api_cors())
            .route("", web::get().to(list_bugs))
            .route("", web::post().to(create_bug)),
    );
}
