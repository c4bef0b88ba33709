use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{config::ShopifyConfig, ShopifyApiError, ShopifyOrder};

#[derive(Clone)]
pub struct ShopifyApi {
    config: ShopifyConfig,
    client: Arc<Client>,
}

impl ShopifyApi {
    pub fn new(config: ShopifyConfig) -> Result<Self, ShopifyApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let val = HeaderValue::from_str(config.admin_access_token.reveal().as_str())
            .map_err(|e| ShopifyApiError::Initialization(e.to_string()))?;
        headers.insert("X-Shopify-Access-Token", val);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ShopifyApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        body: Option<B>,
    ) -> Result<T, ShopifyApiError> {
        let url = self.url(path);
        trace!("🛍️ Sending REST query: {url}");
        let mut req = self.client.request(method, url);
        if !params.is_empty() {
            req = req.query(params);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| ShopifyApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("🛍️ REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| ShopifyApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| ShopifyApiError::RestResponseError(e.to_string()))?;
            Err(ShopifyApiError::QueryError { status, message })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("https://{}/admin/api/{}{path}", self.config.shop, self.config.api_version)
    }

    /// Fetches the current state of an order. Returns `None` if the storefront does not know the order.
    pub async fn get_order(&self, order_id: i64) -> Result<Option<ShopifyOrder>, ShopifyApiError> {
        #[derive(Deserialize)]
        struct OrderResponse {
            order: ShopifyOrder,
        }
        let path = format!("/orders/{order_id}.json");
        debug!("🛍️ Fetching order #{order_id}");
        match self.rest_query::<OrderResponse, ()>(Method::GET, &path, &[], None).await {
            Ok(result) => {
                info!("🛍️ Fetched order #{order_id}");
                Ok(Some(result.order))
            },
            Err(e) if e.is_not_found() => {
                info!("🛍️ Order #{order_id} does not exist on the storefront");
                Ok(None)
            },
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod test {
    use sync_common::Secret;

    use super::*;

    #[test]
    fn admin_urls() {
        let config = ShopifyConfig {
            shop: "my-shop.myshopify.com".into(),
            admin_access_token: Secret::new("shpat_123".into()),
            api_version: "2024-04".into(),
        };
        let api = ShopifyApi::new(config).unwrap();
        assert_eq!(api.url("/orders/42.json"), "https://my-shop.myshopify.com/admin/api/2024-04/orders/42.json");
    }

    #[test]
    fn not_found_is_detected() {
        let e = ShopifyApiError::QueryError { status: 404, message: "Not Found".into() };
        assert!(e.is_not_found());
        let e = ShopifyApiError::QueryError { status: 500, message: "Oops".into() };
        assert!(!e.is_not_found());
    }
}
