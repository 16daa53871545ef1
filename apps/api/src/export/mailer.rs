//! Mail relay: pluggable delivery of exported summaries.
//!
//! Default: `SmtpMailer` (authenticated SMTP relay via lettre).
//! `AppState` holds an `Arc<dyn Mailer>`, so handlers never touch the transport.
//! One message per call: no queueing, no retry.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("invalid attachment content type: {0}")]
    ContentType(String),

    #[error("SMTP delivery failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// A file attached to an outgoing message.
#[derive(Debug, Clone)]
pub struct MailAttachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// An outgoing message with a plain-text body and a single attachment.
#[derive(Debug, Clone)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment: MailAttachment,
}

/// The mail relay trait. Implement this to swap delivery backends without touching
/// the handlers.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_mail(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

// ────────────────────────────────────────────────────────────────────────────
// SmtpMailer
// ────────────────────────────────────────────────────────────────────────────

/// Sends through an authenticated SMTP relay over TLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Builds the relay transport. Messages are sent as `"Note AI" <username>`.
    pub fn new(host: &str, username: &str, password: &str) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();
        let from = Mailbox::new(Some("Note AI".to_string()), username.parse()?);

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_mail(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let message = build_message(self.from.clone(), mail)?;
        self.transport.send(message).await?;
        Ok(())
    }
}

/// Assembles a multipart/mixed message: text body first, then the attachment.
fn build_message(from: Mailbox, mail: OutgoingMail) -> Result<Message, MailError> {
    let to: Mailbox = mail.to.parse()?;
    info!("Sending \"{}\" to {}", mail.subject, to);

    let content_type = ContentType::parse(&mail.attachment.content_type)
        .map_err(|e| MailError::ContentType(e.to_string()))?;

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(mail.subject)
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(mail.body))
                .singlepart(
                    Attachment::new(mail.attachment.filename)
                        .body(mail.attachment.bytes, content_type),
                ),
        )?;

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_mail(to: &str) -> OutgoingMail {
        OutgoingMail {
            to: to.to_string(),
            subject: "Your Meeting Summary".to_string(),
            body: "Please find attached the meeting summary in PDF format.".to_string(),
            attachment: MailAttachment {
                filename: "Meeting Summary.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                bytes: b"%PDF-1.7 test".to_vec(),
            },
        }
    }

    fn sender() -> Mailbox {
        Mailbox::new(Some("Note AI".to_string()), "notes@example.com".parse().unwrap())
    }

    #[test]
    fn test_build_message_includes_attachment() {
        let message = build_message(sender(), sample_mail("alice@example.com")).unwrap();
        let raw = String::from_utf8_lossy(&message.formatted()).to_string();
        assert!(raw.contains("Subject: Your Meeting Summary"));
        assert!(raw.contains("alice@example.com"));
        assert!(raw.contains("Meeting Summary.pdf"));
        assert!(raw.contains("application/pdf"));
    }

    #[test]
    fn test_build_message_rejects_invalid_recipient() {
        let result = build_message(sender(), sample_mail("not-an-address"));
        assert!(matches!(result, Err(MailError::Address(_))));
    }
}
