use bitrix_tools::{BitrixApi, BitrixApiError, ContactFields, DealFields, DealSummary, ProductRow};

use crate::traits::{CrmGateway, CrmGatewayError};

impl From<BitrixApiError> for CrmGatewayError {
    fn from(e: BitrixApiError) -> Self {
        match e {
            BitrixApiError::Initialization(_) | BitrixApiError::RestResponseError(_) => {
                Self::RequestFailed(e.to_string())
            },
            BitrixApiError::QueryError { .. } | BitrixApiError::MethodError { .. } => Self::Rejected(e.to_string()),
            BitrixApiError::JsonError(_) | BitrixApiError::EmptyResult(_) => Self::UnexpectedResponse(e.to_string()),
        }
    }
}

impl CrmGateway for BitrixApi {
    async fn find_deals_by_order_id(&self, order_id: &str) -> Result<Vec<DealSummary>, CrmGatewayError> {
        Ok(BitrixApi::find_deals_by_order_id(self, order_id).await?)
    }

    async fn create_deal(&self, fields: &DealFields) -> Result<i64, CrmGatewayError> {
        Ok(self.add_deal(fields).await?)
    }

    async fn update_deal(&self, deal_id: i64, fields: &DealFields) -> Result<(), CrmGatewayError> {
        Ok(BitrixApi::update_deal(self, deal_id, fields).await?)
    }

    async fn set_product_rows(&self, deal_id: i64, rows: &[ProductRow]) -> Result<(), CrmGatewayError> {
        Ok(BitrixApi::set_product_rows(self, deal_id, rows).await?)
    }

    async fn upsert_contact(&self, contact: &ContactFields) -> Result<Option<i64>, CrmGatewayError> {
        Ok(BitrixApi::upsert_contact(self, contact).await?)
    }
}
