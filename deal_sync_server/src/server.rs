use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use bitrix_tools::BitrixApi;
use deal_sync_engine::{integrations::LogEventStore, DealSyncApi};
use log::*;
use shopify_tools::ShopifyApi;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::health,
    webhook_routes::{OrderCreatedRoute, OrderUpdatedRoute, ProductUpdatedRoute, RefundCreatedRoute},
};

/// Largest webhook body the server accepts.
pub const MAX_PAYLOAD_SIZE: usize = 5 * 1024 * 1024;

pub type LiveDealSyncApi = DealSyncApi<BitrixApi, ShopifyApi, LogEventStore>;

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let srv = create_server_instance(config)?;
    srv.await.map_err(ServerError::from)
}

pub fn create_server_instance(config: ServerConfig) -> Result<Server, ServerError> {
    let crm = BitrixApi::new(config.bitrix.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let storefront =
        ShopifyApi::new(config.shopify.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let events = LogEventStore::new(config.event_log);
    let schema = config.deal_schema.clone();
    info!(
        "💻️ Deal pipelines: stock = {}, pre-order = {}. Default currency: {}",
        schema.stock_category, schema.preorder_category, schema.default_currency
    );
    let srv = HttpServer::new(move || {
        let api: LiveDealSyncApi = DealSyncApi::new(crm.clone(), storefront.clone(), events, schema.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %r").log_target("dss::access_log"))
            .app_data(web::Data::new(api))
            .configure(configure_webhooks::<BitrixApi, ShopifyApi, LogEventStore>)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Registers the health check and the four webhook routes for a given set of gateways, along with the webhook body
/// size limit.
pub fn configure_webhooks<C, S, E>(cfg: &mut web::ServiceConfig)
where
    C: deal_sync_engine::CrmGateway + 'static,
    S: deal_sync_engine::StorefrontGateway + 'static,
    E: deal_sync_engine::EventStore + 'static,
{
    cfg.app_data(web::PayloadConfig::new(MAX_PAYLOAD_SIZE))
        .service(health)
        .service(OrderCreatedRoute::<C, S, E>::new())
        .service(OrderUpdatedRoute::<C, S, E>::new())
        .service(ProductUpdatedRoute::<C, S, E>::new())
        .service(RefundCreatedRoute::<C, S, E>::new());
}
