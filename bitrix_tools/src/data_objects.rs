use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sync_common::Money;

/// `DISCOUNT_TYPE_ID` value for a discount expressed as an amount rather than a percentage.
pub const DISCOUNT_TYPE_ABSOLUTE: u8 = 1;

//--------------------------------------      DealFields     ---------------------------------------------------------
/// The deal fields written by `crm.deal.add` and `crm.deal.update`. Fields left as `None` are not sent, so the CRM
/// keeps whatever value it already has.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealFields {
    #[serde(rename = "TITLE", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "CATEGORY_ID", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u32>,
    #[serde(rename = "STAGE_ID", skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<String>,
    #[serde(rename = "OPPORTUNITY", skip_serializing_if = "Option::is_none")]
    pub opportunity: Option<Money>,
    #[serde(rename = "CURRENCY_ID", skip_serializing_if = "Option::is_none")]
    pub currency_id: Option<String>,
    #[serde(rename = "CONTACT_ID", skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<i64>,
    #[serde(rename = "COMMENTS", skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(rename = "SOURCE_ID", skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(rename = "SOURCE_DESCRIPTION", skip_serializing_if = "Option::is_none")]
    pub source_description: Option<String>,
    #[serde(rename = "UF_SHOPIFY_ORDER_ID", skip_serializing_if = "Option::is_none")]
    pub shopify_order_id: Option<String>,
    #[serde(rename = "UF_SHOPIFY_TOTAL_DISCOUNT", skip_serializing_if = "Option::is_none")]
    pub total_discount: Option<Money>,
    #[serde(rename = "UF_SHOPIFY_TOTAL_TAX", skip_serializing_if = "Option::is_none")]
    pub total_tax: Option<Money>,
    #[serde(rename = "UF_SHOPIFY_SHIPPING_PRICE", skip_serializing_if = "Option::is_none")]
    pub shipping_price: Option<Money>,
    #[serde(rename = "UF_CRM_1739183959976", skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    #[serde(rename = "UF_CRM_1739183268662", skip_serializing_if = "Option::is_none")]
    pub delivery_method: Option<String>,
    #[serde(rename = "UF_CRM_1739183302609", skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
}

//--------------------------------------     DealSummary     ---------------------------------------------------------
/// A deal as returned by the `crm.deal.list` lookup. Bitrix24 returns every scalar as a string, so the numeric fields
/// are parsed leniently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealSummary {
    #[serde(rename = "ID", deserialize_with = "string_or_number")]
    pub id: i64,
    #[serde(rename = "OPPORTUNITY", default)]
    pub opportunity: Option<Money>,
    #[serde(rename = "STAGE_ID", default)]
    pub stage_id: Option<String>,
    #[serde(rename = "CATEGORY_ID", default, deserialize_with = "optional_u32")]
    pub category_id: Option<u32>,
    #[serde(rename = "DATE_CREATE", default)]
    pub date_create: Option<String>,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().ok_or_else(|| de::Error::custom(format!("{n} is not an integer id"))),
        Value::String(s) => s.trim().parse::<i64>().map_err(|e| de::Error::custom(format!("Invalid id {s}. {e}"))),
        v => Err(de::Error::custom(format!("Expected an id, got {v}"))),
    }
}

fn optional_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    Ok(value)
}

//--------------------------------------      ProductRow     ---------------------------------------------------------
/// A line of `crm.deal.productrows.set`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    /// Catalog product id. Zero means a free-form row identified by its name only.
    #[serde(rename = "PRODUCT_ID")]
    pub product_id: i64,
    #[serde(rename = "PRODUCT_NAME")]
    pub product_name: String,
    /// Unit price after discount.
    #[serde(rename = "PRICE")]
    pub price: Money,
    #[serde(rename = "QUANTITY")]
    pub quantity: i64,
    #[serde(rename = "DISCOUNT_TYPE_ID")]
    pub discount_type_id: u8,
    /// Discount per unit.
    #[serde(rename = "DISCOUNT_SUM")]
    pub discount_sum: Money,
}

//--------------------------------------      Contacts       ---------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactFields {
    #[serde(rename = "NAME", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "LAST_NAME", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "EMAIL", skip_serializing_if = "Vec::is_empty", default)]
    pub email: Vec<MultiField>,
    #[serde(rename = "PHONE", skip_serializing_if = "Vec::is_empty", default)]
    pub phone: Vec<MultiField>,
}

impl ContactFields {
    pub fn primary_email(&self) -> Option<&str> {
        self.email.first().map(|f| f.value.as_str())
    }

    pub fn primary_phone(&self) -> Option<&str> {
        self.phone.first().map(|f| f.value.as_str())
    }
}

/// Bitrix24 "multi-field" value, used for emails and phone numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiField {
    #[serde(rename = "VALUE")]
    pub value: String,
    #[serde(rename = "VALUE_TYPE")]
    pub value_type: String,
}

impl MultiField {
    pub fn work(value: &str) -> Self {
        Self { value: value.to_string(), value_type: "WORK".to_string() }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn deal_fields_skip_unset_values() {
        let fields = DealFields {
            opportunity: Some(Money::from_cents(30_950)),
            stage_id: Some("C2:EXECUTING".into()),
            payment_status: Some("56".into()),
            ..Default::default()
        };
        let v = serde_json::to_value(&fields).unwrap();
        assert_eq!(v, json!({"OPPORTUNITY": 309.5, "STAGE_ID": "C2:EXECUTING", "UF_CRM_1739183959976": "56"}));
    }

    #[test]
    fn deal_summary_from_strings() {
        let deal: DealSummary = serde_json::from_value(json!({
            "ID": "1234",
            "OPPORTUNITY": "309.50",
            "STAGE_ID": "C2:NEW",
            "CATEGORY_ID": "2",
            "DATE_CREATE": "2024-11-05T18:12:00+01:00"
        }))
        .unwrap();
        assert_eq!(deal.id, 1234);
        assert_eq!(deal.opportunity, Some(Money::from_cents(30_950)));
        assert_eq!(deal.category_id, Some(2));
    }

    #[test]
    fn deal_summary_with_odd_category() {
        let deal: DealSummary = serde_json::from_value(json!({"ID": 7, "CATEGORY_ID": ""})).unwrap();
        assert_eq!(deal.id, 7);
        assert_eq!(deal.category_id, None);
        assert_eq!(deal.stage_id, None);
    }

    #[test]
    fn product_row_wire_format() {
        let row = ProductRow {
            product_id: 0,
            product_name: "Trail Runner".into(),
            price: Money::from_cents(18_900),
            quantity: 1,
            discount_type_id: DISCOUNT_TYPE_ABSOLUTE,
            discount_sum: Money::from_cents(1_000),
        };
        let v = serde_json::to_value(&row).unwrap();
        assert_eq!(
            v,
            json!({"PRODUCT_ID": 0, "PRODUCT_NAME": "Trail Runner", "PRICE": 189.0, "QUANTITY": 1, "DISCOUNT_TYPE_ID": 1, "DISCOUNT_SUM": 10.0})
        );
    }
}
