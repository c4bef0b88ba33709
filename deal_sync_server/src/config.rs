//! Server configuration.
//!
//! Everything is read from `DSS_*` environment variables (after loading an optional `.env` file). A missing or invalid
//! value is logged and replaced with its default, so the server always starts. See `cli-help.txt` for the full list.
use std::{env, str::FromStr};

use bitrix_tools::BitrixConfig;
use deal_sync_engine::{mapper::PaymentStatusIds, DealSchema};
use log::*;
use shopify_tools::ShopifyConfig;
use sync_common::parse_boolean_flag;

const DEFAULT_DSS_HOST: &str = "127.0.0.1";
const DEFAULT_DSS_PORT: u16 = 8370;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Bitrix24 inbound webhook configuration
    pub bitrix: BitrixConfig,
    /// Shopify admin API configuration, used to re-fetch orders
    pub shopify: ShopifyConfig,
    /// Portal-specific pipeline and list item ids
    pub deal_schema: DealSchema,
    /// If true, every inbound event is written to the `dss::events` log target.
    pub event_log: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DSS_HOST.to_string(),
            port: DEFAULT_DSS_PORT,
            bitrix: BitrixConfig::default(),
            shopify: ShopifyConfig::default(),
            deal_schema: DealSchema::default(),
            event_log: true,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("DSS_HOST").ok().unwrap_or_else(|| DEFAULT_DSS_HOST.into());
        let port = env_or_default("DSS_PORT", DEFAULT_DSS_PORT);
        let bitrix = BitrixConfig::new_from_env_or_default();
        let shopify = ShopifyConfig::new_from_env_or_default();
        let deal_schema = deal_schema_from_env();
        let event_log = parse_boolean_flag(env::var("DSS_EVENT_LOG").ok(), true);
        if !event_log {
            info!("🪛️ Inbound event logging is disabled.");
        }
        Self { host, port, bitrix, shopify, deal_schema, event_log }
    }
}

fn deal_schema_from_env() -> DealSchema {
    let defaults = DealSchema::default();
    let stock_category = env_or_default("DSS_CATEGORY_STOCK", defaults.stock_category);
    let preorder_category = env_or_default("DSS_CATEGORY_PREORDER", defaults.preorder_category);
    if stock_category == preorder_category {
        warn!(
            "🪛️ DSS_CATEGORY_STOCK and DSS_CATEGORY_PREORDER are both {stock_category}. Pre-orders will not get a \
             pipeline of their own."
        );
    }
    let ids = defaults.payment_status_ids;
    let payment_status_ids = PaymentStatusIds {
        paid: env_or_default("DSS_PAYMENT_STATUS_PAID", ids.paid),
        unpaid: env_or_default("DSS_PAYMENT_STATUS_UNPAID", ids.unpaid),
        partially_paid: env_or_default("DSS_PAYMENT_STATUS_PARTIAL", ids.partially_paid),
    };
    let default_currency = env_or_default("DSS_DEFAULT_CURRENCY", defaults.default_currency).to_uppercase();
    DealSchema { stock_category, preorder_category, payment_status_ids, default_currency }
}

/// Reads and parses an environment variable, falling back to `default` (with a log message) if it is missing or
/// invalid.
fn env_or_default<T>(name: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(s) if !s.trim().is_empty() => s.trim().parse::<T>().unwrap_or_else(|e| {
            error!("🪛️ {s} is not a valid value for {name}. {e} Using the default, {default}, instead.");
            default
        }),
        _ => {
            debug!("🪛️ {name} is not set. Using the default value of {default}.");
            default
        },
    }
}
