//! CRM side of the deal sync: a thin Bitrix24 REST client and the wire types for deals, product rows and contacts.
//!
//! Bitrix24 "inbound webhooks" embed the credential in the base URL (`https://{portal}/rest/{user}/{token}`), so the
//! client needs nothing but that URL. Every method is a `POST {base}/{method}.json` with a JSON body.
mod api;
mod config;
mod data_objects;
mod error;
pub mod fields;

pub use api::BitrixApi;
pub use config::BitrixConfig;
pub use data_objects::{ContactFields, DealFields, DealSummary, MultiField, ProductRow, DISCOUNT_TYPE_ABSOLUTE};
pub use error::BitrixApiError;
