//! Gateway implementations backed by the real vendor clients.
//!
//! * [`bitrix_tools::BitrixApi`] implements [`crate::CrmGateway`].
//! * [`shopify_tools::ShopifyApi`] implements [`crate::StorefrontGateway`].
//! * [`LogEventStore`] is an [`crate::EventStore`] that writes events to the log instead of persisting them.
mod bitrix;
mod log_event_store;
mod shopify;

pub use log_event_store::LogEventStore;
