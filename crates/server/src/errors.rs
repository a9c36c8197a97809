use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ModelError;
use service::errors::ServiceError;
use service::storage::StorageError;
use thiserror::Error;
use tracing::error;

/// Error body returned by every handler: `{"error": ..., "message": ...}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: Option<String>) -> Self {
        Self { status, error, message }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(message.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.error, "message": self.message });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(msg) => Self::not_found(msg),
            ServiceError::Validation(msg) | ServiceError::Model(ModelError::Validation(msg)) => {
                Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg))
            }
            ServiceError::Storage(StorageError::NotFound(name)) => Self::not_found(format!("file {name} not found")),
            ServiceError::Storage(StorageError::InvalidName(name)) => {
                Self::new(StatusCode::BAD_REQUEST, "Invalid File Name", Some(format!("invalid file name {name:?}")))
            }
            other => {
                // the cause stays in the log; clients get a generic body
                error!(error = %other, "request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some("internal error".into()))
            }
        }
    }
}

// Payload limits and content-type mismatches keep their own status; every
// other body problem is a plain 400.
fn client_status(status: StatusCode) -> StatusCode {
    match status {
        StatusCode::PAYLOAD_TOO_LARGE | StatusCode::UNSUPPORTED_MEDIA_TYPE => status,
        _ => StatusCode::BAD_REQUEST,
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(r: JsonRejection) -> Self {
        Self::new(client_status(r.status()), "Bad Request", Some(r.body_text()))
    }
}

impl From<MultipartRejection> for JsonApiError {
    fn from(r: MultipartRejection) -> Self {
        Self::new(client_status(r.status()), "Bad Request", Some(r.body_text()))
    }
}

impl From<MultipartError> for JsonApiError {
    fn from(e: MultipartError) -> Self {
        Self::new(client_status(e.status()), "Bad Request", Some(e.body_text()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
