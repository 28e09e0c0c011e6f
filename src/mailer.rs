//! # SMTP Relay
//!
//! Outbound notification mail to the site owner.
//!
//! The message `from` address is the submitter's own email so the owner can
//! reply directly; the destination is a deployment constant resolved once at
//! startup. Delivery is best effort and the pipeline discards the outcome.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;

use crate::{config::Config, feedback::FeedbackRecord};

pub const NOTIFICATION_SUBJECT: &str = "📥 New Project Received from Website";

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Relay rejected the message: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait MailRelay: Send + Sync {
    async fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        body_html: String,
    ) -> Result<(), MailError>;
}

pub struct SmtpRelay {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpRelay {
    pub fn new(config: &Config) -> Result<Self, MailError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.clone(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .credentials(credentials)
            .build();

        Ok(Self { transport })
    }
}

#[async_trait]
impl MailRelay for SmtpRelay {
    async fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        body_html: String,
    ) -> Result<(), MailError> {
        let message = Message::builder()
            .from(from.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body_html)?;

        self.transport.send(message).await?;

        Ok(())
    }
}

/// HTML body of the owner notification. `phone` renders as "Not provided"
/// when absent or empty.
pub fn notification_body(record: &FeedbackRecord) -> String {
    let phone = record
        .phone
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or("Not provided");

    format!(
        r#"
        <p><strong>Client Name:</strong> {name}</p>
        <p><strong>Client Email:</strong> {email}</p>
        <p><strong>Client Phone:</strong> {phone}</p>
        <p><strong>Project Details:</strong></p>
        <blockquote style="border-left: 4px solid #ccc; padding-left: 10px;">{message}</blockquote>
        <p style="margin-top:20px; font-size:12px; color:#666;">This email was sent automatically from your website feedback form.</p>
      "#,
        name = record.name,
        email = record.email,
        phone = phone,
        message = record.message,
    )
}
