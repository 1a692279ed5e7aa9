//! Unit tests for the create-then-notify flow
//!
//! Uses in-memory stores and notifiers to check which side effects happen
//! for each failure mode.

use std::sync::Arc;

use bugtrack::models::{CreateBug, Priority, Status};
use bugtrack::services::{BugSubmission, NotifyError, SubmitError};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{
    login_bug, test_user, FailingNotifier, FailingStore, MemoryStore, RecordingNotifier,
};

#[tokio::test]
async fn test_submit_stores_then_notifies_once() {
    let store = Arc::new(MemoryStore::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let submission = BugSubmission::new(store.clone(), notifier.clone());
    let user = test_user(42);

    let bug = submission.submit(&user, login_bug()).await.unwrap();

    assert_eq!(bug.created_by, 42);
    assert_eq!(bug.status, Status::Open);
    assert_eq!(bug.priority, Priority::High);

    let stored = store.bugs();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, bug.id);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].id, bug.id);
    assert_eq!(sent[0].title, "Login fails");
    assert_eq!(sent[0].description, "500 on submit");
    assert_eq!(sent[0].priority, Priority::High);
    assert_eq!(sent[0].assigned_to, "dev@example.com");
}

#[tokio::test]
async fn test_persistence_failure_skips_notification() {
    let notifier = Arc::new(FailingNotifier::new(NotifyError::Transport(
        "should not be called".to_string(),
    )));
    let submission = BugSubmission::new(Arc::new(FailingStore), notifier.clone());

    let err = submission
        .submit(&test_user(1), login_bug())
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::Persistence(_)));
    assert_eq!(notifier.calls(), 0);
}

#[tokio::test]
async fn test_notification_failure_keeps_record() {
    let store = Arc::new(MemoryStore::default());
    let notifier = Arc::new(FailingNotifier::new(NotifyError::Rejected {
        status: 500,
        message: "Invalid `to` field".to_string(),
    }));
    let submission = BugSubmission::new(store.clone(), notifier.clone());

    let err = submission
        .submit(&test_user(7), login_bug())
        .await
        .unwrap_err();

    match err {
        SubmitError::Notification { bug, source } => {
            assert_eq!(source.to_string(), "Invalid `to` field");
            assert_eq!(store.bugs(), vec![*bug]);
        }
        other => panic!("expected notification error, got {:?}", other),
    }
    assert_eq!(notifier.calls(), 1);
}

#[rstest]
#[case::blank_title(CreateBug { title: " ".to_string(), ..login_bug() })]
#[case::blank_description(CreateBug { description: String::new(), ..login_bug() })]
#[case::missing_assignee(CreateBug { assigned_to: String::new(), ..login_bug() })]
#[case::invalid_assignee(CreateBug { assigned_to: "dev-at-example".to_string(), ..login_bug() })]
#[case::assignee_too_long(CreateBug {
    assigned_to: format!("{}@{}.example.com", "a".repeat(60), "b".repeat(204)),
    ..login_bug()
})]
#[tokio::test]
async fn test_invalid_input_has_no_side_effects(#[case] input: CreateBug) {
    let store = Arc::new(MemoryStore::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let submission = BugSubmission::new(store.clone(), notifier.clone());

    let err = submission.submit(&test_user(1), input).await.unwrap_err();

    assert!(matches!(err, SubmitError::Validation(_)));
    assert!(store.bugs().is_empty());
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_resubmission_is_not_deduplicated() {
    let store = Arc::new(MemoryStore::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let submission = BugSubmission::new(store.clone(), notifier.clone());
    let user = test_user(3);

    let first = submission.submit(&user, login_bug()).await.unwrap();
    let second = submission.submit(&user, login_bug()).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(store.bugs().len(), 2);
    assert_eq!(notifier.sent().len(), 2);
}
