//! # Gateways to the outside world
//!
//! The sync engine never talks to a vendor API directly. Everything it needs from the CRM, the storefront and the
//! event log goes through one of the traits in this module, so that the concrete clients can be swapped out (or
//! mocked in tests) without touching the reconciliation logic.
//!
//! * [`CrmGateway`] finds, creates and updates deals, writes product rows and upserts contacts.
//! * [`StorefrontGateway`] re-fetches a full order by its id.
//! * [`EventStore`] records raw inbound events for observability. It is always called best-effort.
mod crm_gateway;
mod event_store;
mod storefront;

pub use crm_gateway::{CrmGateway, CrmGatewayError};
pub use event_store::{EventStore, EventStoreError};
pub use storefront::{StorefrontError, StorefrontGateway};
