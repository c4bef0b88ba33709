use shopify_tools::ShopifyOrder;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum StorefrontError {
    #[error("Could not fetch data from the storefront: {0}")]
    RequestFailed(String),
    #[error("The storefront sent back an order we could not read: {0}")]
    InvalidOrder(String),
}

#[allow(async_fn_in_trait)]
pub trait StorefrontGateway {
    /// Fetch the current state of an order. An order the storefront does not know about is `Ok(None)`.
    async fn fetch_order(&self, order_id: i64) -> Result<Option<ShopifyOrder>, StorefrontError>;
}
