//! Contact form tests: ordered delivery, failure collapsing, validation

mod helpers;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use axum::http::StatusCode;
use helpers::{TestNotifier, body_string, build_app, post_form};

/// Test: A valid submission sends the support inquiry, then the
/// acknowledgment, and renders the confirmation fragment
#[tokio::test]
async fn test_valid_submission_sends_ordered_pair() {
    let notifier = Arc::new(TestNotifier::default());
    let app = build_app(Arc::clone(&notifier));

    let response = post_form(
        app,
        "/contact",
        &[
            ("name", "Jane Doe"),
            ("email", "jane@example.com"),
            ("phone", "+1 234 567 890"),
            ("message", "How can I get Blitz for my team?"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Message Sent!"));

    let calls = notifier.calls();
    assert_eq!(notifier.call_kinds(), vec!["support", "submitter"]);
    assert_eq!(calls[0].name, "Jane Doe");
    assert_eq!(calls[0].email, "jane@example.com");
    assert_eq!(calls[1].email, "jane@example.com");
}

/// Test: When the support inquiry fails, the acknowledgment is never
/// attempted and the single failure message is rendered
#[tokio::test]
async fn test_support_failure_skips_acknowledgment() {
    let notifier = Arc::new(TestNotifier::default());
    notifier.fail_support.store(true, Ordering::SeqCst);
    let app = build_app(Arc::clone(&notifier));

    let response = post_form(
        app,
        "/contact",
        &[("name", "Jane Doe"), ("email", "jane@example.com")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_string(response).await;
    assert!(body.contains("Failed to send. Please try again."));
    assert_eq!(notifier.call_kinds(), vec!["support"]);
}

/// Test: A failing acknowledgment reports the same error as a failing
/// inquiry - no partial-success state leaks to the visitor
#[tokio::test]
async fn test_acknowledgment_failure_reports_same_error() {
    let notifier = Arc::new(TestNotifier::default());
    notifier.fail_submitter.store(true, Ordering::SeqCst);
    let app = build_app(Arc::clone(&notifier));

    let response = post_form(
        app,
        "/contact",
        &[("name", "Jane Doe"), ("email", "jane@example.com")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_string(response).await;
    assert!(body.contains("Failed to send. Please try again."));
    // The support inquiry did go out and stays delivered.
    assert_eq!(notifier.call_kinds(), vec!["support", "submitter"]);
}

/// Test: Required-field validation mirrors the browser checks; nothing is
/// sent for an empty name or malformed email
#[tokio::test]
async fn test_missing_required_fields_send_nothing() {
    let notifier = Arc::new(TestNotifier::default());
    let app = build_app(Arc::clone(&notifier));

    let response = post_form(
        app,
        "/contact",
        &[("name", ""), ("email", "jane@example.com")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let app = build_app(Arc::clone(&notifier));
    let response = post_form(
        app,
        "/contact",
        &[("name", "Jane Doe"), ("email", "not-an-email")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    assert!(notifier.calls().is_empty());
}

/// Test: Phone and message are optional; omitting them entirely still
/// submits
#[tokio::test]
async fn test_optional_fields_may_be_omitted() {
    let notifier = Arc::new(TestNotifier::default());
    let app = build_app(Arc::clone(&notifier));

    let response = post_form(
        app,
        "/contact",
        &[("name", "Jane Doe"), ("email", "jane@example.com")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(notifier.call_kinds(), vec!["support", "submitter"]);
}
