use serde::{Deserialize, Serialize};
use sync_common::Money;

use crate::helpers::null_as_default;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopifyProduct {
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub handle: String,
    pub vendor: Option<String>,
    pub product_type: Option<String>,
    pub status: Option<String>,
    pub tags: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub variants: Vec<Variant>,
}

impl ShopifyProduct {
    pub fn label(&self) -> String {
        if self.title.is_empty() {
            self.id.to_string()
        } else {
            self.title.clone()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Variant {
    pub id: i64,
    pub product_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub sku: Option<String>,
    pub price: Money,
    pub inventory_quantity: Option<i64>,
}
