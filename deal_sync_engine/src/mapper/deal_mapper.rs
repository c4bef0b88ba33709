use bitrix_tools::{ContactFields, DealFields, MultiField, ProductRow, DISCOUNT_TYPE_ABSOLUTE};
use shopify_tools::{LineItem, ShopifyOrder};
use sync_common::Money;

use super::{DealCategory, DealSchema, DealStage, PaymentStatus};

pub const SOURCE_ID: &str = "STORE";
pub const SOURCE_DESCRIPTION: &str = "Shopify";

/// Everything the CRM needs to know about an order.
#[derive(Debug, Clone, PartialEq)]
pub struct DealMapping {
    pub category: DealCategory,
    pub stage: DealStage,
    pub payment_status: PaymentStatus,
    /// The complete field set, as written when a deal is created.
    pub fields: DealFields,
    /// One row per line item, in order.
    pub rows: Vec<ProductRow>,
}

impl DealMapping {
    /// The fields that are refreshed on an existing deal when the order changes. The category is only written when it
    /// differs from `current_category_id`, and the stage is always resolved within the category the deal ends up in.
    pub fn update_fields(&self, current_category_id: u32) -> DealFields {
        let new_category_id = self.fields.category_id.unwrap_or(current_category_id);
        DealFields {
            category_id: (new_category_id != current_category_id).then_some(new_category_id),
            stage_id: Some(self.stage.stage_id(new_category_id)),
            payment_status: self.fields.payment_status.clone(),
            delivery_method: self.fields.delivery_method.clone(),
            delivery_address: self.fields.delivery_address.clone(),
            ..self.totals()
        }
    }

    /// Only the monetary fields: opportunity, discount, tax and shipping.
    pub fn totals(&self) -> DealFields {
        DealFields {
            opportunity: self.fields.opportunity,
            total_discount: self.fields.total_discount,
            total_tax: self.fields.total_tax,
            shipping_price: self.fields.shipping_price,
            ..Default::default()
        }
    }
}

/// Translate a storefront order into CRM deal fields and product rows.
pub fn map_order_to_deal(order: &ShopifyOrder, schema: &DealSchema) -> DealMapping {
    let category = DealCategory::from_tags(&order.tags);
    let category_id = category.id(schema);
    let stage = DealStage::for_financial_status(order.financial_status());
    let payment_status = PaymentStatus::for_financial_status(order.financial_status());
    let currency = order
        .currency
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(&schema.default_currency)
        .to_uppercase();
    let delivery_method = order.shipping_lines.first().map(|l| l.title.trim()).filter(|t| !t.is_empty());
    let fields = DealFields {
        title: Some(format!("Shopify order {}", order.label())),
        category_id: Some(category_id),
        stage_id: Some(stage.stage_id(category_id)),
        opportunity: Some(order.effective_total().non_negative()),
        currency_id: Some(currency),
        contact_id: None,
        comments: order.note.as_deref().map(str::trim).filter(|n| !n.is_empty()).map(String::from),
        source_id: Some(SOURCE_ID.to_string()),
        source_description: Some(SOURCE_DESCRIPTION.to_string()),
        shopify_order_id: Some(order.id.to_string()),
        total_discount: Some(order.effective_discounts().non_negative()),
        total_tax: Some(order.effective_tax().non_negative()),
        shipping_price: Some(order.shipping_cost().non_negative()),
        payment_status: Some(payment_status.enum_id(schema).to_string()),
        delivery_method: delivery_method.map(String::from),
        delivery_address: order.shipping_address.as_ref().and_then(|a| a.formatted()),
    };
    let rows = order.line_items.iter().map(line_item_to_row).collect();
    DealMapping { category, stage, payment_status, fields, rows }
}

/// The CRM contact for the customer who placed the order. Returns `None` if the order has neither an email address
/// nor a phone number, since there is nothing to match an existing contact on.
pub fn contact_from_order(order: &ShopifyOrder) -> Option<ContactFields> {
    let email = order.contact_email().map(str::trim);
    let phone = order.contact_phone().map(str::trim);
    if email.is_none() && phone.is_none() {
        return None;
    }
    let customer = order.customer.as_ref();
    let address = order.shipping_address.as_ref();
    let name = customer.and_then(|c| c.first_name.clone()).or_else(|| address.and_then(|a| a.first_name.clone()));
    let last_name = customer.and_then(|c| c.last_name.clone()).or_else(|| address.and_then(|a| a.last_name.clone()));
    Some(ContactFields {
        name,
        last_name,
        email: email.map(MultiField::work).into_iter().collect(),
        phone: phone.map(MultiField::work).into_iter().collect(),
    })
}

/// Converts a line item into a product row. The row price is the unit price net of the per-unit share of the line
/// discount, and is never negative.
pub fn line_item_to_row(item: &LineItem) -> ProductRow {
    let quantity = item.effective_quantity();
    let discount = item.line_discount().non_negative().per_unit(item.quantity.max(quantity));
    let mut name = item.title.trim().to_string();
    if let Some(variant) = item.variant_title.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        name.push_str(" / ");
        name.push_str(variant);
    }
    if let Some(sku) = item.sku.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        name.push_str(&format!(" [{sku}]"));
    }
    ProductRow {
        product_id: 0,
        product_name: name,
        price: (item.price - discount).non_negative(),
        quantity,
        discount_type_id: DISCOUNT_TYPE_ABSOLUTE,
        discount_sum: discount.min(item.price.non_negative()),
    }
}
