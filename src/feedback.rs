//! # Feedback Intake
//!
//! The pipeline behind the contact form: validate, persist, notify.
//!
//! - Required-field validation happens before any side effect
//! - The store assigns `id` and `createdAt`; records are immutable after that
//! - The owner notification is fired after a durable write and its outcome is
//!   discarded, so relay failures never reach the caller

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{info, warn};

use crate::{
    error::AppError,
    mailer::{MailRelay, NOTIFICATION_SUBJECT, notification_body},
    state::AppState,
    store::{FeedbackStore, StoreError},
};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Name, email, and message are required fields.";

/// A persisted contact-form submission. Field names on the wire match the
/// stored document (`_id`, `createdAt`); `phone` is omitted entirely when the
/// submitter left it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// An inbound submission before the store has assigned `id`/`createdAt`.
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

pub async fn submit(state: &AppState, submission: NewFeedback) -> Result<FeedbackRecord, AppError> {
    if submission.name.is_empty() || submission.email.is_empty() || submission.message.is_empty() {
        return Err(AppError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
    }

    let record = state.store.create(submission).await.map_err(|e| match e {
        StoreError::Validation(messages) => AppError::Validation(messages.join(", ")),
        other => AppError::SaveFeedback(other),
    })?;

    notify_owner(state, record.clone());

    Ok(record)
}

pub async fn list_all(state: &AppState) -> Result<Vec<FeedbackRecord>, AppError> {
    state
        .store
        .find_all_newest_first()
        .await
        .map_err(AppError::FetchFeedback)
}

/// Dispatches the owner notification as a detached task. The caller never
/// awaits it; the submission already succeeded by the time this runs.
fn notify_owner(state: &AppState, record: FeedbackRecord) {
    let mailer = state.mailer.clone();
    let to = state.config.owner_email.clone();
    let deadline = state.config.notify_timeout;

    tokio::spawn(async move {
        let send = mailer.send(
            &record.email,
            &to,
            NOTIFICATION_SUBJECT,
            notification_body(&record),
        );

        match timeout(deadline, send).await {
            Ok(Ok(())) => info!("Feedback notification email sent"),
            Ok(Err(e)) => warn!("Error sending notification email: {e}"),
            Err(_) => warn!("Notification email timed out after {deadline:?}"),
        }
    });
}
