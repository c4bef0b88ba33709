use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use deal_sync_engine::DealSyncError;
use thiserror::Error;

use crate::data_objects::ErrorResponse;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Invalid payload. {message}")]
    InvalidPayload { request_id: String, message: String },
    #[error("Webhook processing failed. {message}")]
    SyncFailed { request_id: String, message: String },
}

impl ServerError {
    /// Attaches the request correlation id to a failure from the sync engine.
    pub fn from_sync_error(request_id: &str, e: DealSyncError) -> Self {
        let request_id = request_id.to_string();
        match e {
            DealSyncError::InvalidPayload(message) => Self::InvalidPayload { request_id, message },
            e => Self::SyncFailed { request_id, message: e.to_string() },
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidPayload { .. } => StatusCode::BAD_REQUEST,
            Self::SyncFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            Self::MethodNotAllowed => response.insert_header(ContentType::plaintext()).body(self.to_string()),
            Self::InvalidPayload { request_id, message } => {
                response.json(ErrorResponse::new("Invalid payload", message, request_id))
            },
            Self::SyncFailed { request_id, message } => {
                response.json(ErrorResponse::new("Internal server error", message, request_id))
            },
            _ => response
                .insert_header(ContentType::json())
                .body(serde_json::json!({ "error": self.to_string() }).to_string()),
        }
    }
}
