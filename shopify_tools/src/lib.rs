//! Storefront side of the deal sync: the Shopify webhook payloads this service consumes, and a minimal admin REST
//! client used to re-fetch orders.
mod api;
mod config;
mod error;
pub mod helpers;
mod shopify_order;
mod shopify_product;
mod shopify_refund;

pub use api::ShopifyApi;
pub use config::ShopifyConfig;
pub use error::ShopifyApiError;
pub use shopify_order::{
    Address,
    Customer,
    DiscountAllocation,
    FinancialStatus,
    LineItem,
    OrderBuilder,
    PriceSet,
    ShippingLine,
    ShopMoney,
    ShopifyOrder,
    Tags,
};
pub use shopify_product::{ShopifyProduct, Variant};
pub use shopify_refund::{RefundLineItem, RefundTransaction, ShopifyRefund};
