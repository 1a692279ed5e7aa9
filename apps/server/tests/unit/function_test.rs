//! Unit tests for the send-bug-email function handler
//!
//! Runs the handler in an actix test service with a recording mailer.

use actix_web::{test, web, App};
use bugtrack::functions::{self, FunctionSettings};
use bugtrack::services::EmailSender;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::common::RecordingMailer;

const FROM: &str = "Bug Tracker <bugs@resend.dev>";
const TOKEN: &str = "anon-key";
const URI: &str = "/functions/v1/send-bug-email";

fn settings(token: Option<&str>) -> web::Data<FunctionSettings> {
    web::Data::new(FunctionSettings {
        from_address: FROM.to_string(),
        token: token.map(str::to_string),
    })
}

fn payload() -> Value {
    json!({
        "bugData": {
            "id": "0b6f1c2e-8d5a-4f7e-9d7b-2a4f7c9e1a10",
            "title": "Login fails",
            "description": "500 on submit",
            "priority": "high",
            "status": "open",
            "assigned_to": "dev@example.com",
            "created_by": 7,
            "created_at": "2026-01-01T00:00:00Z"
        }
    })
}

macro_rules! init_app {
    ($mailer:expr, $token:expr) => {
        test::init_service(
            App::new()
                .app_data(settings($token))
                .app_data(web::Data::from($mailer.clone() as Arc<dyn EmailSender>))
                .configure(functions::configure),
        )
        .await
    };
}

fn assert_cors(headers: &actix_web::http::header::HeaderMap) {
    for (name, value) in functions::CORS_HEADERS {
        assert_eq!(
            headers.get(name).and_then(|v| v.to_str().ok()),
            Some(value),
            "header {}",
            name
        );
    }
}

#[actix_web::test]
async fn test_preflight_returns_cors_headers_and_no_body() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = init_app!(mailer, Some(TOKEN));

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri(URI)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_cors(resp.headers());
    let body = test::read_body(resp).await;
    assert!(body.is_empty());
    assert!(mailer.sent().is_empty());
}

#[actix_web::test]
async fn test_post_sends_email_to_assignee() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = init_app!(mailer, Some(TOKEN));

    let req = test::TestRequest::post()
        .uri(URI)
        .insert_header(("Authorization", format!("Bearer {}", TOKEN)))
        .set_json(payload())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_cors(resp.headers());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Email sent successfully" }));

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].from, FROM);
    assert_eq!(sent[0].to, "dev@example.com");
    assert_eq!(sent[0].subject, "New Bug Report: Login fails");
    assert!(sent[0].html.contains("500 on submit"));
    assert!(sent[0].html.contains("#F97316"));
}

#[actix_web::test]
async fn test_post_without_token_is_rejected() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = init_app!(mailer, Some(TOKEN));

    let req = test::TestRequest::post()
        .uri(URI)
        .set_json(payload())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
    assert!(mailer.sent().is_empty());
}

#[actix_web::test]
async fn test_post_with_wrong_token_is_rejected() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = init_app!(mailer, Some(TOKEN));

    let req = test::TestRequest::post()
        .uri(URI)
        .insert_header(("Authorization", "Bearer nope"))
        .set_json(payload())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    assert!(mailer.sent().is_empty());
}

#[actix_web::test]
async fn test_open_function_accepts_missing_token() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = init_app!(mailer, None);

    let req = test::TestRequest::post()
        .uri(URI)
        .set_json(payload())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(mailer.sent().len(), 1);
}

#[actix_web::test]
async fn test_malformed_body_is_a_500_with_error() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = init_app!(mailer, None);

    let req = test::TestRequest::post()
        .uri(URI)
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"bugData\":")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    assert_cors(resp.headers());
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
}

#[actix_web::test]
async fn test_provider_failure_is_reported() {
    let mailer = Arc::new(RecordingMailer::rejecting("The `to` field is invalid"));
    let app = init_app!(mailer, None);

    let req = test::TestRequest::post()
        .uri(URI)
        .set_json(payload())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "The `to` field is invalid" }));
}
