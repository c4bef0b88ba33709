use thiserror::Error;

use crate::traits::CrmGatewayError;

/// Errors that fail a webhook request. Anything not listed here is logged and swallowed by the handlers.
#[derive(Debug, Clone, Error)]
pub enum DealSyncError {
    #[error("Could not create a deal for order {order_id}. {source}")]
    DealCreationFailed { order_id: String, source: CrmGatewayError },
    #[error("Could not look up the deals for order {order_id}. {source}")]
    DealLookupFailed { order_id: String, source: CrmGatewayError },
    #[error("Invalid payload. {0}")]
    InvalidPayload(String),
}
