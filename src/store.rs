//! # MongoDB
//!
//! Document store for feedback records.
//!
//! ## Schema
//! - One collection, `feedbacks`
//! - Fields: `_id` (**ObjectId**), `name` (**string**), `email` (**string**),
//!   `phone` (**string**, absent when not provided), `message` (**string**),
//!   `createdAt` (**date**)
//! - `name`, `email`, `message` are required non-empty; the store rejects the
//!   insert with per-field messages otherwise
//! - The store assigns `_id` and `createdAt` at insert time; documents are
//!   never updated or deleted by this service

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    Client, Collection,
    bson::{doc, oid::ObjectId},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::feedback::{FeedbackRecord, NewFeedback};

pub const FEEDBACK_COLLECTION: &str = "feedbacks";
pub const CREATED_AT: &str = "createdAt";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Store unavailable: {0}")]
    Unavailable(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn create(&self, submission: NewFeedback) -> Result<FeedbackRecord, StoreError>;

    async fn find_all_newest_first(&self) -> Result<Vec<FeedbackRecord>, StoreError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct FeedbackDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    message: String,
    #[serde(
        rename = "createdAt",
        with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    created_at: DateTime<Utc>,
}

impl From<FeedbackDocument> for FeedbackRecord {
    fn from(document: FeedbackDocument) -> Self {
        Self {
            id: document.id.to_hex(),
            name: document.name,
            email: document.email,
            phone: document.phone,
            message: document.message,
            created_at: document.created_at,
        }
    }
}

pub struct MongoStore {
    collection: Collection<FeedbackDocument>,
}

impl MongoStore {
    pub async fn connect(mongo_url: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(mongo_url)
            .await
            .map_err(|e| StoreError::Unavailable(e.into()))?;

        Ok(Self {
            collection: client.database(database).collection(FEEDBACK_COLLECTION),
        })
    }
}

#[async_trait]
impl FeedbackStore for MongoStore {
    async fn create(&self, submission: NewFeedback) -> Result<FeedbackRecord, StoreError> {
        let messages = validate_required(&submission);
        if !messages.is_empty() {
            return Err(StoreError::Validation(messages));
        }

        let document = FeedbackDocument {
            id: ObjectId::new(),
            name: submission.name,
            email: submission.email,
            phone: submission.phone,
            message: submission.message,
            created_at: Utc::now(),
        };

        self.collection
            .insert_one(&document)
            .await
            .map_err(|e| StoreError::Unavailable(e.into()))?;

        Ok(document.into())
    }

    async fn find_all_newest_first(&self) -> Result<Vec<FeedbackRecord>, StoreError> {
        let mut cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { CREATED_AT: -1 })
            .await
            .map_err(|e| StoreError::Unavailable(e.into()))?;

        let mut records = Vec::new();
        while let Some(document) = cursor
            .try_next()
            .await
            .map_err(|e| StoreError::Unavailable(e.into()))?
        {
            records.push(document.into());
        }

        Ok(records)
    }
}

fn validate_required(submission: &NewFeedback) -> Vec<String> {
    let mut messages = Vec::new();

    if submission.name.is_empty() {
        messages.push("Name is required.".to_string());
    }
    if submission.email.is_empty() {
        messages.push("Email is required.".to_string());
    }
    if submission.message.is_empty() {
        messages.push("Message is required.".to_string());
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> NewFeedback {
        NewFeedback {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            phone: None,
            message: "Test message".to_string(),
        }
    }

    #[test]
    fn complete_submission_passes_validation() {
        assert!(validate_required(&submission()).is_empty());
    }

    #[test]
    fn empty_name_yields_single_message() {
        let mut incomplete = submission();
        incomplete.name = String::new();

        assert_eq!(validate_required(&incomplete), vec!["Name is required."]);
    }

    #[test]
    fn all_empty_yields_every_message_in_field_order() {
        let incomplete = NewFeedback {
            name: String::new(),
            email: String::new(),
            phone: Some("123".to_string()),
            message: String::new(),
        };

        assert_eq!(
            validate_required(&incomplete),
            vec!["Name is required.", "Email is required.", "Message is required."]
        );
    }

    #[test]
    fn document_round_trips_into_record() {
        let id = ObjectId::new();
        let now = Utc::now();

        let record: FeedbackRecord = FeedbackDocument {
            id,
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            phone: Some("123".to_string()),
            message: "Test message".to_string(),
            created_at: now,
        }
        .into();

        assert_eq!(record.id, id.to_hex());
        assert_eq!(record.phone.as_deref(), Some("123"));
        assert_eq!(record.created_at, now);
    }
}
