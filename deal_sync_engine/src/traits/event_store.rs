use serde_json::Value;
use thiserror::Error;

use crate::WebhookTopic;

#[derive(Debug, Clone, Error)]
#[error("Could not store the event: {0}")]
pub struct EventStoreError(pub String);

/// A sink for raw inbound webhook events. Storage failures must never affect the outcome of a request, so callers
/// only log the error.
#[allow(async_fn_in_trait)]
pub trait EventStore {
    async fn store_event(&self, request_id: &str, topic: WebhookTopic, payload: &Value) -> Result<(), EventStoreError>;
}
