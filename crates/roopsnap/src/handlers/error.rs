use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::BytesRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use roopsnap_core::storage::{repository_error_to_status_code, RepositoryError};
use roopsnap_core::studio::ValidationError;

/// Error returned by the JSON API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was malformed or incomplete (400).
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Every store in the chain failed, or the record was not found.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    /// A write needs the database and none is configured (500).
    #[error("MongoDB not configured")]
    NotConfigured,
    /// The request body exceeded the upload limit (413).
    #[error("Payload too large")]
    PayloadTooLarge,
    /// Anything unexpected (500). The message is logged, never returned.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Repository(err) => StatusCode::from_u16(repository_error_to_status_code(err))
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> serde_json::Value {
        match self {
            ApiError::Validation(ValidationError::InvalidBody(details)) => json!({
                "error": "Invalid request body",
                "details": details,
            }),
            ApiError::Validation(err) => json!({ "error": err.to_string() }),
            ApiError::Repository(RepositoryError::NotFound { entity_type, .. }) => json!({
                "success": false,
                "error": format!("{entity_type} not found"),
            }),
            ApiError::Repository(err) => json!({
                "error": "Database error",
                "details": err.to_string(),
            }),
            ApiError::NotConfigured => json!({
                "error": "MongoDB not configured",
                "details": "Please set MONGODB_URI environment variable.",
            }),
            ApiError::PayloadTooLarge => json!({ "error": "Payload too large" }),
            ApiError::Internal(_) => json!({ "error": "Internal Server Error" }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "API error");
        } else {
            tracing::warn!(status = %status, error = %self, "API error");
        }

        (status, Json(self.body())).into_response()
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge;
        }
        ApiError::Validation(ValidationError::InvalidBody(rejection.body_text()))
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::Validation(ValidationError::InvalidBody(rejection.body_text()))
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        let status = err.status();
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else if status.is_server_error() {
            ApiError::Internal(err.body_text())
        } else {
            ApiError::Validation(ValidationError::InvalidBody(err.body_text()))
        }
    }
}
