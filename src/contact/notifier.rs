use async_trait::async_trait;
use thiserror::Error;

/// Payload of the first outbound notification: the inquiry routed to the
/// support inbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportInquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Payload of the second outbound notification: the auto-reply confirming
/// receipt to the person who submitted the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgment {
    pub name: String,
    pub email: String,
}

/// The single failure kind the contact flow exposes.
///
/// Network errors, provider rejections and partial completion all collapse
/// into this one value; the detail only ever reaches the logs.
#[derive(Debug, Error)]
#[error("send failed")]
pub struct NotifyError {
    detail: String,
}

impl NotifyError {
    pub fn new(detail: impl std::fmt::Display) -> Self {
        Self {
            detail: detail.to_string(),
        }
    }

    /// Diagnostic detail for logging. Never shown to the user.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Outbound delivery seam for the contact form.
///
/// Implemented by [`crate::email::EmailService`] in production and by
/// recording fakes in tests. Callers only depend on success or failure,
/// never on transport internals.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_support(&self, inquiry: &SupportInquiry) -> Result<(), NotifyError>;

    async fn notify_submitter(&self, ack: &Acknowledgment) -> Result<(), NotifyError>;
}
