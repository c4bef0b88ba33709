use std::fmt::Display;

use serde::{Deserialize, Serialize};
use shopify_tools::{FinancialStatus, Tags};

/// Order tags that put a deal in the pre-order pipeline. Matched case-insensitively against the trimmed tag.
pub const PREORDER_TAGS: [&str; 2] = ["pre-order", "preorder-product-added"];

pub const DEFAULT_STOCK_CATEGORY: u32 = 2;
pub const DEFAULT_PREORDER_CATEGORY: u32 = 8;
pub const DEFAULT_CURRENCY: &str = "EUR";

//--------------------------------------      DealSchema     ---------------------------------------------------------
/// The portal-specific ids that the mapping tables resolve to. These differ between CRM portals, so they are
/// configurable rather than baked into the tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealSchema {
    pub stock_category: u32,
    pub preorder_category: u32,
    pub payment_status_ids: PaymentStatusIds,
    /// Used when an order does not state its currency.
    pub default_currency: String,
}

impl DealSchema {
    /// The category id a deal currently sits in. Missing and zero ids are treated as the stock pipeline.
    pub fn category_or_stock(&self, category_id: Option<u32>) -> u32 {
        category_id.filter(|id| *id != 0).unwrap_or(self.stock_category)
    }
}

impl Default for DealSchema {
    fn default() -> Self {
        Self {
            stock_category: DEFAULT_STOCK_CATEGORY,
            preorder_category: DEFAULT_PREORDER_CATEGORY,
            payment_status_ids: PaymentStatusIds::default(),
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Enumeration item ids of the payment-status list field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStatusIds {
    pub paid: String,
    pub unpaid: String,
    pub partially_paid: String,
}

impl Default for PaymentStatusIds {
    fn default() -> Self {
        Self { paid: "56".to_string(), unpaid: "58".to_string(), partially_paid: "60".to_string() }
    }
}

//--------------------------------------     DealCategory    ---------------------------------------------------------
/// The deal pipeline an order belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealCategory {
    Stock,
    PreOrder,
}

impl DealCategory {
    pub fn from_tags(tags: &Tags) -> Self {
        if tags.iter().any(|t| PREORDER_TAGS.iter().any(|p| t.trim().eq_ignore_ascii_case(p))) {
            Self::PreOrder
        } else {
            Self::Stock
        }
    }

    pub fn id(&self, schema: &DealSchema) -> u32 {
        match self {
            Self::Stock => schema.stock_category,
            Self::PreOrder => schema.preorder_category,
        }
    }
}

impl Display for DealCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stock => write!(f, "stock"),
            Self::PreOrder => write!(f, "pre-order"),
        }
    }
}

//--------------------------------------       DealStage     ---------------------------------------------------------
/// A position in a deal pipeline. Every category has the same set of stages; only the id prefix differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealStage {
    New,
    AwaitingPayment,
    Paid,
    Refunded,
    Cancelled,
}

impl DealStage {
    pub fn for_financial_status(status: FinancialStatus) -> Self {
        use FinancialStatus::*;
        match status {
            Pending | Authorized | PartiallyPaid => Self::AwaitingPayment,
            Paid | PartiallyRefunded => Self::Paid,
            Refunded => Self::Refunded,
            Voided | Expired => Self::Cancelled,
            Unknown => Self::New,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::AwaitingPayment => "PREPAYMENT_INVOICE",
            Self::Paid => "EXECUTING",
            Self::Refunded => "LOSE",
            Self::Cancelled => "APOLOGY",
        }
    }

    /// The full stage id. Stages of the default pipeline (category 0) carry no prefix.
    pub fn stage_id(&self, category_id: u32) -> String {
        if category_id == 0 {
            self.code().to_string()
        } else {
            format!("C{category_id}:{}", self.code())
        }
    }
}

//--------------------------------------    PaymentStatus    ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    PartiallyPaid,
}

impl PaymentStatus {
    pub fn for_financial_status(status: FinancialStatus) -> Self {
        match status {
            FinancialStatus::Paid => Self::Paid,
            FinancialStatus::PartiallyPaid | FinancialStatus::PartiallyRefunded => Self::PartiallyPaid,
            _ => Self::Unpaid,
        }
    }

    pub fn enum_id<'a>(&self, schema: &'a DealSchema) -> &'a str {
        let ids = &schema.payment_status_ids;
        match self {
            Self::Paid => &ids.paid,
            Self::Unpaid => &ids.unpaid,
            Self::PartiallyPaid => &ids.partially_paid,
        }
    }
}
