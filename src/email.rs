//! Email delivery for the contact form, using lettre

use anyhow::{Context, Result};
use askama::Template;
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

use crate::config::EmailConfig;
use crate::contact::{Acknowledgment, Notifier, NotifyError, SupportInquiry};

/// Support inquiry email HTML template
#[derive(Template)]
#[template(path = "emails/support-inquiry.html")]
struct SupportInquiryHtmlTemplate<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    message: &'a str,
}

/// Support inquiry email plain text template
#[derive(Template)]
#[template(path = "emails/support-inquiry.txt")]
struct SupportInquiryTextTemplate<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    message: &'a str,
}

/// Acknowledgment email HTML template
#[derive(Template)]
#[template(path = "emails/acknowledgment.html")]
struct AcknowledgmentHtmlTemplate<'a> {
    name: &'a str,
}

/// Acknowledgment email plain text template
#[derive(Template)]
#[template(path = "emails/acknowledgment.txt")]
struct AcknowledgmentTextTemplate<'a> {
    name: &'a str,
}

/// Email service for sending the contact form notifications
#[derive(Clone)]
pub struct EmailService {
    mailer: SmtpTransport,
    from: Mailbox,
    support_address: String,
    skip_sending: bool,
}

impl EmailService {
    /// Create a new email service from configuration
    pub fn new(config: &EmailConfig) -> Result<Self> {
        let mailer = if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );
            // Use builder_dangerous for unauthenticated SMTP (e.g., MailDev)
            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                from = %config.from_address,
                "Email service initialized with authentication and TLS"
            );
            // SmtpTransport::relay() uses STARTTLS by default, which is
            // appropriate for most SMTP servers on port 587
            let creds =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());
            SmtpTransport::relay(&config.smtp_host)?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        let from: Mailbox = format!("{} <{}>", config.from_name, config.from_address)
            .parse()
            .context("Failed to parse from email")?;

        Ok(Self {
            mailer,
            from,
            support_address: config.support_address.clone(),
            skip_sending: false,
        })
    }

    /// Create a mock email service for testing (skips actual SMTP)
    pub fn new_mock(config: &EmailConfig) -> Result<Self> {
        let mut service = Self::new(config)?;
        service.skip_sending = true;
        info!(
            from = %service.from,
            "Mock email service initialized (SMTP calls skipped)"
        );
        Ok(service)
    }

    async fn send(&self, to: &str, subject: &str, html: String, plain: String) -> Result<()> {
        let to_mailbox: Mailbox = to.parse().context("Failed to parse to email")?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(plain, html))
            .context("Failed to build email message")?;

        if self.skip_sending {
            info!(to, subject, "Mock email service: skipping SMTP send");
            return Ok(());
        }

        info!(to, subject, "Sending email");
        self.mailer.send(&message)?;

        Ok(())
    }
}

#[async_trait]
impl Notifier for EmailService {
    async fn notify_support(&self, inquiry: &SupportInquiry) -> Result<(), NotifyError> {
        let html = SupportInquiryHtmlTemplate {
            name: &inquiry.name,
            email: &inquiry.email,
            phone: &inquiry.phone,
            message: &inquiry.message,
        }
        .render()
        .map_err(NotifyError::new)?;

        let plain = SupportInquiryTextTemplate {
            name: &inquiry.name,
            email: &inquiry.email,
            phone: &inquiry.phone,
            message: &inquiry.message,
        }
        .render()
        .map_err(NotifyError::new)?;

        let subject = format!("New support inquiry from {}", inquiry.name);
        self.send(&self.support_address, &subject, html, plain)
            .await
            .map_err(|err| NotifyError::new(format!("{err:#}")))
    }

    async fn notify_submitter(&self, ack: &Acknowledgment) -> Result<(), NotifyError> {
        let html = AcknowledgmentHtmlTemplate { name: &ack.name }
            .render()
            .map_err(NotifyError::new)?;

        let plain = AcknowledgmentTextTemplate { name: &ack.name }
            .render()
            .map_err(NotifyError::new)?;

        self.send(&ack.email, "We received your message", html, plain)
            .await
            .map_err(|err| NotifyError::new(format!("{err:#}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_service_renders_and_skips_smtp() {
        let config = EmailConfig::default();
        let service = EmailService::new_mock(&config).unwrap();

        let inquiry = SupportInquiry {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: String::new(),
            message: "Hello there".to_string(),
        };
        assert!(service.notify_support(&inquiry).await.is_ok());

        let ack = Acknowledgment {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
        };
        assert!(service.notify_submitter(&ack).await.is_ok());
    }

    #[tokio::test]
    async fn test_unparseable_recipient_is_a_send_failure() {
        let config = EmailConfig::default();
        let service = EmailService::new_mock(&config).unwrap();

        let ack = Acknowledgment {
            name: "Jane Doe".to_string(),
            email: "not an address".to_string(),
        };
        let err = service.notify_submitter(&ack).await.unwrap_err();
        assert_eq!(err.to_string(), "send failed");
    }
}
