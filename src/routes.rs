use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    error::AppError,
    feedback::{self, FeedbackRecord, NewFeedback},
    state::AppState,
};

/// Inbound contact-form body. Every field is defaulted so a missing field and
/// an empty field both reach the pipeline's required-field check instead of
/// being rejected as a malformed payload.
#[derive(Deserialize)]
pub struct FeedbackPayload {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    message: String,
}

#[derive(Serialize)]
struct SubmitResponse {
    success: bool,
    message: &'static str,
    data: FeedbackRecord,
}

#[derive(Serialize)]
struct ListResponse {
    success: bool,
    data: Vec<FeedbackRecord>,
    count: usize,
}

pub async fn submit_feedback_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<FeedbackPayload>,
) -> Result<impl IntoResponse, AppError> {
    let record = feedback::submit(
        &state,
        NewFeedback {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            message: payload.message,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            success: true,
            message: "Feedback submitted successfully!",
            data: record,
        }),
    ))
}

pub async fn list_feedback_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let records = feedback::list_all(&state).await?;

    Ok(Json(ListResponse {
        success: true,
        count: records.len(),
        data: records,
    }))
}

pub async fn health_handler() -> impl IntoResponse {
    Json(json!({ "success": true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_instead_of_failing_deserialization() {
        let payload: FeedbackPayload = serde_json::from_str("{}").unwrap();

        assert!(payload.name.is_empty());
        assert!(payload.email.is_empty());
        assert!(payload.phone.is_none());
        assert!(payload.message.is_empty());
    }

    #[test]
    fn explicit_empty_phone_stays_distinct_from_absent() {
        let payload: FeedbackPayload = serde_json::from_str(r#"{"phone": ""}"#).unwrap();
        assert_eq!(payload.phone.as_deref(), Some(""));
    }
}
