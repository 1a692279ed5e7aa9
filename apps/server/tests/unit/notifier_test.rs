//! Unit tests for the HTTP client that invokes the notification function

use bugtrack::config::FunctionsConfig;
use bugtrack::models::{BugReport, Priority, Status};
use bugtrack::services::notification::FALLBACK_NOTIFY_ERROR;
use bugtrack::services::{BugNotifier, FunctionNotifier, NotifyError};
use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FUNCTION_PATH: &str = "/functions/v1/send-bug-email";

fn stored_bug() -> BugReport {
    BugReport {
        id: Uuid::new_v4(),
        title: "Login fails".to_string(),
        description: "500 on submit".to_string(),
        priority: Priority::High,
        status: Status::Open,
        assigned_to: "dev@example.com".to_string(),
        created_by: 7,
        created_at: Utc::now(),
    }
}

fn notifier_for(server: &MockServer, token: Option<&str>) -> FunctionNotifier {
    let config = FunctionsConfig {
        base_url: server.uri().parse().unwrap(),
        token: token.map(str::to_string),
    };
    FunctionNotifier::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_posts_bug_data_with_bearer_token() {
    let server = MockServer::start().await;
    let bug = stored_bug();

    Mock::given(method("POST"))
        .and(path(FUNCTION_PATH))
        .and(header("Authorization", "Bearer anon-key"))
        .and(body_partial_json(json!({
            "bugData": {
                "id": bug.id,
                "title": "Login fails",
                "description": "500 on submit",
                "priority": "high",
                "status": "open",
                "assigned_to": "dev@example.com"
            }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Email sent successfully" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let notifier = notifier_for(&server, Some("anon-key"));
    assert!(notifier.url().ends_with(FUNCTION_PATH));

    notifier.notify(&bug).await.unwrap();
}

#[tokio::test]
async fn test_error_body_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(FUNCTION_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "Missing API key" })))
        .mount(&server)
        .await;

    let err = notifier_for(&server, None)
        .notify(&stored_bug())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        NotifyError::Rejected {
            status: 500,
            message: "Missing API key".to_string(),
        }
    );
}

#[tokio::test]
async fn test_non_json_error_uses_fallback_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = notifier_for(&server, None)
        .notify(&stored_bug())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), FALLBACK_NOTIFY_ERROR);
}

#[tokio::test]
async fn test_unreachable_function_is_a_transport_error() {
    let notifier = FunctionNotifier::new("http://127.0.0.1:9/functions/v1/send-bug-email", None)
        .unwrap();

    let err = notifier.notify(&stored_bug()).await.unwrap_err();

    assert!(matches!(err, NotifyError::Transport(_)));
}
