use std::fmt::Display;

use chrono::Utc;
use rand::{Rng, RngCore};
use serde::{Deserialize, Deserializer, Serialize};
use sync_common::Money;

use crate::helpers::{null_as_default, split_comma_list};

/// The subset of a Shopify order that the deal sync cares about. The same shape is delivered by the `orders/create`
/// and `orders/updated` webhooks, and returned by the admin REST API.
///
/// Every field is optional on the wire; anything missing takes its default value.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ShopifyOrder {
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub currency: Option<String>,
    pub financial_status: Option<FinancialStatus>,
    pub created_at: Option<String>,
    pub note: Option<String>,
    pub total_price: Money,
    pub current_total_price: Option<Money>,
    pub subtotal_price: Money,
    pub total_tax: Money,
    pub current_total_tax: Option<Money>,
    pub total_discounts: Money,
    pub current_total_discounts: Option<Money>,
    pub total_shipping_price_set: Option<PriceSet>,
    #[serde(deserialize_with = "null_as_default")]
    pub shipping_lines: Vec<ShippingLine>,
    #[serde(deserialize_with = "null_as_default")]
    pub line_items: Vec<LineItem>,
    pub tags: Tags,
    pub customer: Option<Customer>,
    pub shipping_address: Option<Address>,
}

impl ShopifyOrder {
    /// A label for log messages: the order name if there is one, the numeric id otherwise.
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            self.id.to_string()
        } else {
            self.name.clone()
        }
    }

    pub fn financial_status(&self) -> FinancialStatus {
        self.financial_status.unwrap_or_default()
    }

    /// The order total after edits and refunds, if Shopify supplied it.
    pub fn effective_total(&self) -> Money {
        self.current_total_price.unwrap_or(self.total_price)
    }

    pub fn effective_tax(&self) -> Money {
        self.current_total_tax.unwrap_or(self.total_tax)
    }

    pub fn effective_discounts(&self) -> Money {
        self.current_total_discounts.unwrap_or(self.total_discounts)
    }

    /// Shipping cost in shop currency. Prefers the pre-computed price set, and falls back to summing the shipping
    /// lines.
    pub fn shipping_cost(&self) -> Money {
        match &self.total_shipping_price_set {
            Some(set) => set.shop_money.amount,
            None => self.shipping_lines.iter().map(|l| l.discounted_price.unwrap_or(l.price)).sum(),
        }
    }

    /// The email or phone number the customer can be reached on, checking the customer record first.
    pub fn contact_email(&self) -> Option<&str> {
        self.customer
            .as_ref()
            .and_then(|c| c.email.as_deref())
            .or(self.email.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    pub fn contact_phone(&self) -> Option<&str> {
        self.customer
            .as_ref()
            .and_then(|c| c.phone.as_deref())
            .or(self.phone.as_deref())
            .or(self.shipping_address.as_ref().and_then(|a| a.phone.as_deref()))
            .filter(|s| !s.trim().is_empty())
    }
}

//--------------------------------------   FinancialStatus   ---------------------------------------------------------
/// Shopify's payment state for an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancialStatus {
    Pending,
    Authorized,
    PartiallyPaid,
    Paid,
    PartiallyRefunded,
    Refunded,
    Voided,
    Expired,
    #[default]
    #[serde(other)]
    Unknown,
}

impl FinancialStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Authorized => "authorized",
            Self::PartiallyPaid => "partially_paid",
            Self::Paid => "paid",
            Self::PartiallyRefunded => "partially_refunded",
            Self::Refunded => "refunded",
            Self::Voided => "voided",
            Self::Expired => "expired",
            Self::Unknown => "unknown",
        }
    }
}

impl Display for FinancialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//--------------------------------------         Tags        ---------------------------------------------------------
/// Order tags. The webhooks send a comma-separated string, but some integrations forward an array instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tags(pub Vec<String>);

impl Tags {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains_ignore_case(&self, tag: &str) -> bool {
        self.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

impl From<&str> for Tags {
    fn from(s: &str) -> Self {
        Self(split_comma_list(s))
    }
}

impl<'de> Deserialize<'de> for Tags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawTags {
            List(Vec<String>),
            Text(String),
        }
        let tags = match Option::<RawTags>::deserialize(deserializer)? {
            None => Tags::default(),
            Some(RawTags::Text(s)) => Tags::from(s.as_str()),
            Some(RawTags::List(v)) => {
                Tags(v.into_iter().map(|t| t.trim().to_string()).filter(|t| !t.is_empty()).collect())
            },
        };
        Ok(tags)
    }
}

//--------------------------------------      Line items     ---------------------------------------------------------
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub id: i64,
    pub product_id: Option<i64>,
    pub variant_id: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub variant_title: Option<String>,
    pub sku: Option<String>,
    pub quantity: i64,
    /// Quantity after removals and refunds. Only present on newer API versions.
    pub current_quantity: Option<i64>,
    pub price: Money,
    pub total_discount: Money,
    #[serde(deserialize_with = "null_as_default")]
    pub discount_allocations: Vec<DiscountAllocation>,
}

impl LineItem {
    pub fn effective_quantity(&self) -> i64 {
        self.current_quantity.unwrap_or(self.quantity).max(0)
    }

    /// The discount applied to the whole line. Discount allocations are authoritative when present.
    pub fn line_discount(&self) -> Money {
        if self.discount_allocations.is_empty() {
            self.total_discount
        } else {
            self.discount_allocations.iter().map(|d| d.amount).sum()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountAllocation {
    pub amount: Money,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingLine {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub code: Option<String>,
    pub price: Money,
    pub discounted_price: Option<Money>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceSet {
    pub shop_money: ShopMoney,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopMoney {
    pub amount: Money,
    pub currency_code: Option<String>,
}

//--------------------------------------  Customer & address ---------------------------------------------------------
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub id: i64,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

impl Address {
    /// A single-line postal address, e.g. "Main St 1, Apt 2, 1010 Vienna, Austria". Returns `None` if there is nothing
    /// to show.
    pub fn formatted(&self) -> Option<String> {
        let locality = [non_empty(&self.zip), non_empty(&self.city)].into_iter().flatten().collect::<Vec<_>>().join(" ");
        let locality = (!locality.is_empty()).then_some(locality);
        let parts = [
            non_empty(&self.address1).map(String::from),
            non_empty(&self.address2).map(String::from),
            locality,
            non_empty(&self.province).map(String::from),
            non_empty(&self.country).map(String::from),
        ];
        let line = parts.into_iter().flatten().collect::<Vec<_>>().join(", ");
        (!line.is_empty()).then_some(line)
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

//--------------------------------------     OrderBuilder    ---------------------------------------------------------
/// Builds plausible orders for tests and for poking a running server by hand.
#[derive(Debug, Clone, Default)]
pub struct OrderBuilder {
    id: Option<i64>,
    name: Option<String>,
    email: Option<String>,
    currency: Option<String>,
    financial_status: Option<FinancialStatus>,
    total_price: Option<Money>,
    current_total_price: Option<Money>,
    total_tax: Option<Money>,
    total_discounts: Option<Money>,
    shipping: Option<Money>,
    tags: Option<Tags>,
    line_items: Vec<LineItem>,
    customer: Option<Customer>,
}

impl OrderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn random_order() -> ShopifyOrder {
        OrderBuilder::new().build()
    }

    pub fn id(&mut self, id: i64) -> &mut Self {
        self.id = Some(id);
        self
    }

    pub fn name(&mut self, name: &str) -> &mut Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn email(&mut self, email: &str) -> &mut Self {
        self.email = Some(email.to_string());
        self
    }

    pub fn currency(&mut self, currency: &str) -> &mut Self {
        self.currency = Some(currency.to_string());
        self
    }

    pub fn financial_status(&mut self, status: FinancialStatus) -> &mut Self {
        self.financial_status = Some(status);
        self
    }

    pub fn total_price(&mut self, total: Money) -> &mut Self {
        self.total_price = Some(total);
        self
    }

    pub fn current_total_price(&mut self, total: Money) -> &mut Self {
        self.current_total_price = Some(total);
        self
    }

    pub fn total_tax(&mut self, tax: Money) -> &mut Self {
        self.total_tax = Some(tax);
        self
    }

    pub fn total_discounts(&mut self, discounts: Money) -> &mut Self {
        self.total_discounts = Some(discounts);
        self
    }

    pub fn shipping(&mut self, shipping: Money) -> &mut Self {
        self.shipping = Some(shipping);
        self
    }

    pub fn tags(&mut self, tags: &str) -> &mut Self {
        self.tags = Some(Tags::from(tags));
        self
    }

    pub fn line_item(&mut self, title: &str, sku: Option<&str>, price: Money, quantity: i64) -> &mut Self {
        let id = i64::try_from(self.line_items.len()).unwrap_or_default() + 1;
        self.line_items.push(LineItem {
            id,
            title: title.to_string(),
            sku: sku.map(String::from),
            price,
            quantity,
            ..Default::default()
        });
        self
    }

    pub fn customer(&mut self, customer: Customer) -> &mut Self {
        self.customer = Some(customer);
        self
    }

    pub fn build(&self) -> ShopifyOrder {
        let mut rng = rand::thread_rng();
        #[allow(clippy::cast_possible_wrap)]
        let id = self.id.unwrap_or_else(|| (rng.next_u64() >> 1) as i64);
        let subtotal: Money = self.line_items.iter().map(|l| l.price * l.quantity).sum();
        let total_price = self.total_price.unwrap_or_else(|| {
            if self.line_items.is_empty() {
                Money::from_cents(rng.gen_range(1_000..250_000))
            } else {
                subtotal
            }
        });
        let shipping = self.shipping.map(|amount| PriceSet { shop_money: ShopMoney { amount, currency_code: None } });
        ShopifyOrder {
            id,
            name: self.name.clone().unwrap_or_else(|| format!("#{}", rng.gen_range(1000..9999))),
            email: self.email.clone(),
            phone: None,
            currency: Some(self.currency.clone().unwrap_or_else(|| "EUR".to_string())),
            financial_status: Some(self.financial_status.unwrap_or(FinancialStatus::Paid)),
            created_at: Some(Utc::now().to_rfc3339()),
            note: None,
            total_price,
            current_total_price: self.current_total_price,
            subtotal_price: subtotal,
            total_tax: self.total_tax.unwrap_or_default(),
            current_total_tax: None,
            total_discounts: self.total_discounts.unwrap_or_default(),
            current_total_discounts: None,
            total_shipping_price_set: shipping,
            shipping_lines: vec![],
            line_items: self.line_items.clone(),
            tags: self.tags.clone().unwrap_or_default(),
            customer: self.customer.clone(),
            shipping_address: None,
        }
    }
}
