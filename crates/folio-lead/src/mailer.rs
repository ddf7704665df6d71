//! Delivery of lead notifications.

use async_trait::async_trait;
use folio_core::SmtpSettings;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::submission::LeadEmail;

/// Mail delivery errors.
#[derive(Debug, Error)]
pub enum MailError {
    /// A configured sender or recipient is not a valid mailbox.
    #[error("invalid address {address}: {source}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    /// The message could not be assembled.
    #[error("message error: {0}")]
    Message(#[from] lettre::error::Error),

    /// Connection, authentication or delivery failure.
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// The server accepted the connection but failed the health check.
    #[error("SMTP server {0} did not pass the connection check")]
    Unverified(String),
}

/// Sends a composed notification using resolved SMTP settings.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, settings: &SmtpSettings, email: &LeadEmail) -> Result<(), MailError>;
}

/// [`Mailer`] backed by an SMTP relay. A transport is opened per message.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmtpMailer;

fn mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|source| MailError::Address {
        address: address.to_string(),
        source,
    })
}

/// Assemble the plain-text message.
pub fn build_message(settings: &SmtpSettings, email: &LeadEmail) -> Result<Message, MailError> {
    Ok(Message::builder()
        .from(mailbox(&settings.from)?)
        .to(mailbox(&settings.to)?)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(email.body.clone())?)
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, settings: &SmtpSettings, email: &LeadEmail) -> Result<(), MailError> {
        let message = build_message(settings, email)?;

        let builder = if settings.implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
        };
        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.user.clone(),
                settings.pass.clone(),
            ))
            .build();

        debug!(host = %settings.host, port = settings.port, "verifying SMTP connection");
        if !transport.test_connection().await? {
            return Err(MailError::Unverified(settings.host.clone()));
        }

        transport.send(message).await?;
        info!(to = %settings.to, subject = %email.subject, "lead notification sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(from: &str) -> SmtpSettings {
        SmtpSettings {
            host: "smtp.mail.test".into(),
            port: 587,
            user: "robot@example.com".into(),
            pass: "secret".into(),
            from: from.into(),
            to: "owner@example.com".into(),
        }
    }

    fn email() -> LeadEmail {
        LeadEmail {
            subject: "New Project Inquiry: Other".into(),
            body: "hello".into(),
        }
    }

    #[test]
    fn test_build_message() {
        let message = build_message(&settings("Portfolio <robot@example.com>"), &email()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Subject: New Project Inquiry: Other"));
        assert!(raw.contains("To: owner@example.com"));
        assert!(raw.contains("text/plain"));
    }

    #[test]
    fn test_build_message_bad_sender() {
        let err = build_message(&settings("not an address"), &email()).unwrap_err();
        assert!(matches!(err, MailError::Address { .. }));
    }
}
