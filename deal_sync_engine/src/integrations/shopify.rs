use shopify_tools::{ShopifyApi, ShopifyApiError, ShopifyOrder};

use crate::traits::{StorefrontError, StorefrontGateway};

impl From<ShopifyApiError> for StorefrontError {
    fn from(e: ShopifyApiError) -> Self {
        match e {
            ShopifyApiError::JsonError(_) => Self::InvalidOrder(e.to_string()),
            _ => Self::RequestFailed(e.to_string()),
        }
    }
}

impl StorefrontGateway for ShopifyApi {
    async fn fetch_order(&self, order_id: i64) -> Result<Option<ShopifyOrder>, StorefrontError> {
        Ok(self.get_order(order_id).await?)
    }
}
