use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// Caller-facing failures. The display string of each variant is exactly what
/// the client receives in the `message` field; store-level detail is only ever
/// logged server-side.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Error saving feedback. Please try again.")]
    SaveFeedback(#[source] StoreError),

    #[error("Error fetching feedback.")]
    FetchFeedback(#[source] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::SaveFeedback { .. } | AppError::FetchFeedback { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if let AppError::SaveFeedback(source) | AppError::FetchFeedback(source) = &self {
            error!("Feedback store error: {source}");
        }

        let body = Json(json!({
            "success": false,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let response = AppError::Validation("Name is required.".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failures_map_to_internal_error() {
        let save = AppError::SaveFeedback(StoreError::Unavailable("connection refused".into()));
        assert_eq!(save.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let fetch = AppError::FetchFeedback(StoreError::Unavailable("connection refused".into()));
        assert_eq!(fetch.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn fixed_messages_never_leak_store_detail() {
        let save = AppError::SaveFeedback(StoreError::Unavailable("topology secret".into()));
        assert_eq!(save.to_string(), "Error saving feedback. Please try again.");

        let fetch = AppError::FetchFeedback(StoreError::Unavailable("topology secret".into()));
        assert_eq!(fetch.to_string(), "Error fetching feedback.");
    }
}
