use log::*;
use serde_json::Value;

use crate::{
    traits::{EventStore, EventStoreError},
    WebhookTopic,
};

pub const EVENT_LOG_TARGET: &str = "dss::events";

/// Writes every inbound event to the `dss::events` log target. The summary goes out at `info`, the full payload at
/// `trace`. Nothing is persisted.
#[derive(Debug, Clone, Copy)]
pub struct LogEventStore {
    enabled: bool,
}

impl LogEventStore {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for LogEventStore {
    fn default() -> Self {
        Self::new(true)
    }
}

impl EventStore for LogEventStore {
    async fn store_event(&self, request_id: &str, topic: WebhookTopic, payload: &Value) -> Result<(), EventStoreError> {
        if !self.enabled {
            return Ok(());
        }
        let id = payload.get("id").map(ToString::to_string).unwrap_or_else(|| "n/a".into());
        info!(target: EVENT_LOG_TARGET, "🗃️ [{request_id}] {topic} event for id {id}");
        if log_enabled!(target: EVENT_LOG_TARGET, Level::Trace) {
            let body = serde_json::to_string(payload).map_err(|e| EventStoreError(e.to_string()))?;
            trace!(target: EVENT_LOG_TARGET, "🗃️ [{request_id}] {body}");
        }
        Ok(())
    }
}
