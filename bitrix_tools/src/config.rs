use log::*;
use sync_common::Secret;

#[derive(Debug, Clone, Default)]
pub struct BitrixConfig {
    /// Inbound webhook base URL, e.g. `https://my-portal.bitrix24.eu/rest/52/s3cr3t`. The token is part of the URL, so
    /// the whole thing is treated as a secret.
    pub webhook_url: Secret<String>,
}

impl BitrixConfig {
    pub fn new(webhook_url: &str) -> Self {
        Self { webhook_url: Secret::new(webhook_url.to_string()) }
    }

    pub fn new_from_env_or_default() -> Self {
        let webhook_url = std::env::var("DSS_BITRIX_WEBHOOK_URL").unwrap_or_else(|_| {
            error!("🪛️ DSS_BITRIX_WEBHOOK_URL is not set. Every call to the CRM is going to fail.");
            String::default()
        });
        Self { webhook_url: Secret::new(webhook_url) }
    }
}
