//! # Order → Deal mapping
//!
//! [`map_order_to_deal`] is a pure function. Given the same order and [`DealSchema`] it always produces the same
//! [`DealMapping`]: the deal fields to write, the product rows to attach and the pipeline category the order belongs
//! in. All the vendor-specific classification lives in the lookup tables in [`DealCategory`], [`DealStage`] and
//! [`PaymentStatus`].
mod deal_mapper;
mod tables;

pub use deal_mapper::{contact_from_order, line_item_to_row, map_order_to_deal, DealMapping};
pub use tables::{DealCategory, DealSchema, DealStage, PaymentStatus, PaymentStatusIds, PREORDER_TAGS};
