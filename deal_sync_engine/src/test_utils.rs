//! Mock gateways for exercising [`crate::DealSyncApi`] without a CRM or a storefront.
use bitrix_tools::{ContactFields, DealFields, DealSummary, ProductRow};
use mockall::mock;
use serde_json::Value;
use shopify_tools::ShopifyOrder;

use crate::{
    traits::{CrmGateway, CrmGatewayError, EventStore, EventStoreError, StorefrontError, StorefrontGateway},
    WebhookTopic,
};

mock! {
    pub Crm {}
    impl CrmGateway for Crm {
        async fn find_deals_by_order_id(&self, order_id: &str) -> Result<Vec<DealSummary>, CrmGatewayError>;
        async fn create_deal(&self, fields: &DealFields) -> Result<i64, CrmGatewayError>;
        async fn update_deal(&self, deal_id: i64, fields: &DealFields) -> Result<(), CrmGatewayError>;
        async fn set_product_rows(&self, deal_id: i64, rows: &[ProductRow]) -> Result<(), CrmGatewayError>;
        async fn upsert_contact(&self, contact: &ContactFields) -> Result<Option<i64>, CrmGatewayError>;
    }
}

mock! {
    pub Storefront {}
    impl StorefrontGateway for Storefront {
        async fn fetch_order(&self, order_id: i64) -> Result<Option<ShopifyOrder>, StorefrontError>;
    }
}

mock! {
    pub Events {}
    impl EventStore for Events {
        async fn store_event(&self, request_id: &str, topic: WebhookTopic, payload: &Value) -> Result<(), EventStoreError>;
    }
}
