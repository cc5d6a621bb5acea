//! Test helper functions for building the app with a recording notifier

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use axum::response::Response;
use http_body_util::BodyExt;
use tower::ServiceExt;

use blitz_site::config::{Config, EmailConfig, ObservabilityConfig, ServerConfig};
use blitz_site::contact::{Acknowledgment, Notifier, NotifyError, SupportInquiry};

/// One observed outbound notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub kind: &'static str,
    pub name: String,
    pub email: String,
}

/// Notifier that records the ordered call sequence instead of talking to
/// an SMTP server. Failures can be scripted per step.
#[derive(Default)]
pub struct TestNotifier {
    calls: Mutex<Vec<RecordedCall>>,
    pub fail_support: AtomicBool,
    pub fail_submitter: AtomicBool,
}

impl TestNotifier {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_kinds(&self) -> Vec<&'static str> {
        self.calls().into_iter().map(|call| call.kind).collect()
    }
}

#[async_trait]
impl Notifier for TestNotifier {
    async fn notify_support(&self, inquiry: &SupportInquiry) -> Result<(), NotifyError> {
        self.calls.lock().unwrap().push(RecordedCall {
            kind: "support",
            name: inquiry.name.clone(),
            email: inquiry.email.clone(),
        });
        if self.fail_support.load(Ordering::SeqCst) {
            return Err(NotifyError::new("scripted support failure"));
        }
        Ok(())
    }

    async fn notify_submitter(&self, ack: &Acknowledgment) -> Result<(), NotifyError> {
        self.calls.lock().unwrap().push(RecordedCall {
            kind: "submitter",
            name: ack.name.clone(),
            email: ack.email.clone(),
        });
        if self.fail_submitter.load(Ordering::SeqCst) {
            return Err(NotifyError::new("scripted acknowledgment failure"));
        }
        Ok(())
    }
}

pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        email: EmailConfig::default(),
        observability: ObservabilityConfig::default(),
    }
}

pub fn build_app(notifier: Arc<TestNotifier>) -> Router {
    blitz_site::create_app(create_test_config(), notifier)
}

pub async fn get(app: Router, path: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("request"),
    )
    .await
    .expect("response")
}

pub async fn post_form(app: Router, path: &str, fields: &[(&str, &str)]) -> Response {
    let body = serde_urlencoded::to_string(fields).expect("encode form");
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("request"),
    )
    .await
    .expect("response")
}

pub async fn body_string(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
