//! Deal Sync Engine
//!
//! The engine turns storefront webhook events into CRM deal mutations. It is provider-agnostic: the CRM, the
//! storefront and the event store are reached through the traits in [`mod@traits`], and the concrete Bitrix24 and
//! Shopify clients are wired in by the [`mod@integrations`] module.
//!
//! The library is divided into three main sections:
//! 1. The order→deal mapper ([`mod@mapper`]). A pure function plus the finite lookup tables for pipeline category,
//!    stage and payment status.
//! 2. The public API ([`DealSyncApi`]), one method per webhook topic. Each call is a single, best-effort pass: there
//!    is no retry and no locking. Two concurrent deliveries for the same unseen order can both create a deal.
//! 3. Per-request structured logging ([`RequestLogger`]), which carries the request correlation id through every
//!    step.
pub mod integrations;
pub mod mapper;
mod sync_api;
pub mod traits;
mod webhook_topic;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use mapper::{map_order_to_deal, DealCategory, DealMapping, DealSchema, DealStage, PaymentStatus};
pub use sync_api::{
    deal_sync_api::{parse_payload, DealSyncApi, SyncOutcome},
    errors::DealSyncError,
    request_logger::RequestLogger,
};
pub use traits::{CrmGateway, CrmGatewayError, EventStore, EventStoreError, StorefrontError, StorefrontGateway};
pub use webhook_topic::WebhookTopic;
