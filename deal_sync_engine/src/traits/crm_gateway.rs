use bitrix_tools::{ContactFields, DealFields, DealSummary, ProductRow};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CrmGatewayError {
    #[error("Could not reach the CRM: {0}")]
    RequestFailed(String),
    #[error("The CRM rejected the call. {0}")]
    Rejected(String),
    #[error("The CRM sent back something unexpected: {0}")]
    UnexpectedResponse(String),
}

/// The deal pipeline operations the sync engine needs from a CRM.
#[allow(async_fn_in_trait)]
pub trait CrmGateway {
    /// Fetch every deal whose external order id field equals `order_id`, most recently created first.
    async fn find_deals_by_order_id(&self, order_id: &str) -> Result<Vec<DealSummary>, CrmGatewayError>;
    /// Create a new deal and return its id.
    async fn create_deal(&self, fields: &DealFields) -> Result<i64, CrmGatewayError>;
    /// Overwrite the given fields on an existing deal. Fields that are `None` are left untouched.
    async fn update_deal(&self, deal_id: i64, fields: &DealFields) -> Result<(), CrmGatewayError>;
    /// Replace all the product rows of a deal.
    async fn set_product_rows(&self, deal_id: i64, rows: &[ProductRow]) -> Result<(), CrmGatewayError>;
    /// Find a matching contact and update it, or create a new one. Returns `None` if there was nothing to match on.
    async fn upsert_contact(&self, contact: &ContactFields) -> Result<Option<i64>, CrmGatewayError>;
}
