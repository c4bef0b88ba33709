//! Names of the deal fields this service reads and writes. The `UF_` fields are portal-specific user fields.

pub const ID: &str = "ID";
pub const TITLE: &str = "TITLE";
pub const CATEGORY_ID: &str = "CATEGORY_ID";
pub const STAGE_ID: &str = "STAGE_ID";
pub const OPPORTUNITY: &str = "OPPORTUNITY";
pub const DATE_CREATE: &str = "DATE_CREATE";

/// The external-id field joining a deal back to its Shopify order.
pub const SHOPIFY_ORDER_ID: &str = "UF_SHOPIFY_ORDER_ID";
pub const SHOPIFY_TOTAL_DISCOUNT: &str = "UF_SHOPIFY_TOTAL_DISCOUNT";
pub const SHOPIFY_TOTAL_TAX: &str = "UF_SHOPIFY_TOTAL_TAX";
pub const SHOPIFY_SHIPPING_PRICE: &str = "UF_SHOPIFY_SHIPPING_PRICE";
/// Enumeration field holding the payment status.
pub const PAYMENT_STATUS: &str = "UF_CRM_1739183959976";
pub const DELIVERY_METHOD: &str = "UF_CRM_1739183268662";
pub const DELIVERY_ADDRESS: &str = "UF_CRM_1739183302609";

/// The projection requested when looking deals up by order id.
pub const DEAL_LOOKUP_SELECT: [&str; 5] = [ID, OPPORTUNITY, STAGE_ID, CATEGORY_ID, DATE_CREATE];
