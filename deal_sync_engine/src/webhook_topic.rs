use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The storefront webhook topics this service subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebhookTopic {
    #[serde(rename = "orders/create")]
    OrdersCreate,
    #[serde(rename = "orders/updated")]
    OrdersUpdated,
    #[serde(rename = "products/update")]
    ProductsUpdate,
    #[serde(rename = "refunds/create")]
    RefundsCreate,
}

impl WebhookTopic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrdersCreate => "orders/create",
            Self::OrdersUpdated => "orders/updated",
            Self::ProductsUpdate => "products/update",
            Self::RefundsCreate => "refunds/create",
        }
    }
}

impl Display for WebhookTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
