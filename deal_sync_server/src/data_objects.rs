use serde::{Deserialize, Serialize};

/// The body of every successful webhook response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub success: bool,
    pub request_id: String,
    pub topic: String,
}

impl WebhookResponse {
    pub fn success<S: Into<String>>(request_id: S, topic: &str) -> Self {
        Self { success: true, request_id: request_id.into(), topic: topic.to_string() }
    }
}

/// The body of a failed webhook request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub request_id: String,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str, request_id: &str) -> Self {
        Self { error: error.to_string(), message: message.to_string(), request_id: request_id.to_string() }
    }
}
