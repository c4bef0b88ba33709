use serde::{Deserialize, Serialize};
use sync_common::Money;

use crate::helpers::null_as_default;

/// The payload of the `refunds/create` webhook. This is *not* an order: it only references the order by id and lists
/// what was refunded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopifyRefund {
    pub id: i64,
    pub order_id: i64,
    pub created_at: Option<String>,
    pub note: Option<String>,
    /// Some integrations send the refunded total directly. Shopify itself only sends transactions.
    pub amount: Option<Money>,
    pub currency: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub refund_line_items: Vec<RefundLineItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub transactions: Vec<RefundTransaction>,
}

impl ShopifyRefund {
    /// The amount of money returned to the customer by this refund.
    pub fn refund_amount(&self) -> Money {
        match self.amount {
            Some(amount) => amount,
            None => self.transactions.iter().filter(|t| t.is_refund()).map(|t| t.amount).sum(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RefundLineItem {
    pub id: i64,
    pub line_item_id: i64,
    pub quantity: i64,
    pub subtotal: Money,
    pub total_tax: Money,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RefundTransaction {
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub amount: Money,
    pub currency: Option<String>,
}

impl RefundTransaction {
    pub fn is_refund(&self) -> bool {
        self.kind == "refund" && matches!(self.status.as_str(), "success" | "pending")
    }
}
