use log::*;
use sync_common::Secret;

pub const DEFAULT_SHOPIFY_API_VERSION: &str = "2024-04";

#[derive(Debug, Clone, Default)]
pub struct ShopifyConfig {
    /// The storefront's admin host, e.g. "my-shop.myshopify.com"
    pub shop: String,
    pub admin_access_token: Secret<String>,
    pub api_version: String,
}

impl ShopifyConfig {
    pub fn new_from_env_or_default() -> Self {
        let shop = std::env::var("DSS_SHOPIFY_SHOP").unwrap_or_else(|_| {
            warn!("🪛️ DSS_SHOPIFY_SHOP not set, using (probably useless) default");
            "example.myshopify.com".to_string()
        });
        let api_version = std::env::var("DSS_SHOPIFY_API_VERSION").unwrap_or_else(|_| {
            warn!("🪛️ DSS_SHOPIFY_API_VERSION not set, using {DEFAULT_SHOPIFY_API_VERSION} as default");
            DEFAULT_SHOPIFY_API_VERSION.to_string()
        });
        let admin_access_token = Secret::new(std::env::var("DSS_SHOPIFY_ADMIN_ACCESS_TOKEN").unwrap_or_else(|_| {
            warn!("🪛️ DSS_SHOPIFY_ADMIN_ACCESS_TOKEN not set. Refunds will not be able to re-fetch their orders.");
            "shpat_00000000000000".to_string()
        }));
        Self { shop, admin_access_token, api_version }
    }
}
