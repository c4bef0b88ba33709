//! One handler per webhook topic. They all follow the same steps:
//! 1. Assign a correlation id and build the request's [`RequestLogger`].
//! 2. Parse the JSON body. Invalid JSON is a 400.
//! 3. Hand the raw event to the event store (best-effort).
//! 4. Deserialize the topic's payload type and run the matching [`DealSyncApi`] method.
//! 5. Answer with `{success, requestId, topic}`, or the error body.
use actix_web::{web, HttpResponse};
use deal_sync_engine::{
    parse_payload,
    CrmGateway,
    DealSyncApi,
    EventStore,
    RequestLogger,
    StorefrontGateway,
    WebhookTopic,
};
use serde_json::Value;
use shopify_tools::{ShopifyOrder, ShopifyProduct, ShopifyRefund};

use crate::{data_objects::WebhookResponse, errors::ServerError, helpers::new_request_id, route};

fn start_request(topic: WebhookTopic, body: &[u8]) -> RequestLogger {
    let log = RequestLogger::new(new_request_id(), topic);
    log.info(format_args!("💻️ ===== Incoming {topic} webhook ({} bytes) =====", body.len()));
    log
}

fn read_body(log: &RequestLogger, body: &[u8]) -> Result<Value, ServerError> {
    serde_json::from_slice::<Value>(body).map_err(|e| {
        log.warn(format_args!("💻️ Request body is not valid JSON. {e}"));
        ServerError::InvalidPayload { request_id: log.request_id().to_string(), message: e.to_string() }
    })
}

fn fail(log: &RequestLogger, e: deal_sync_engine::DealSyncError) -> ServerError {
    log.error(format_args!("💻️ ❌️ {e}"));
    ServerError::from_sync_error(log.request_id(), e)
}

fn done(log: &RequestLogger) -> HttpResponse {
    log.info("💻️ ✅️ Request processed successfully");
    HttpResponse::Ok().json(WebhookResponse::success(log.request_id(), log.topic().as_str()))
}

route!(order_created => Post "/api/webhook/shopify/order/crt" impl CrmGateway, StorefrontGateway, EventStore);
pub async fn order_created<C, S, E>(
    body: web::Bytes,
    api: web::Data<DealSyncApi<C, S, E>>,
) -> Result<HttpResponse, ServerError>
where
    C: CrmGateway,
    S: StorefrontGateway,
    E: EventStore,
{
    let log = start_request(WebhookTopic::OrdersCreate, &body);
    let payload = read_body(&log, &body)?;
    api.record_event(&log, &payload).await;
    let order = parse_payload::<ShopifyOrder>(&payload).map_err(|e| fail(&log, e))?;
    api.order_created(&log, &order).await.map_err(|e| fail(&log, e))?;
    Ok(done(&log))
}

route!(order_updated => Post "/api/webhook/shopify/order/upd" impl CrmGateway, StorefrontGateway, EventStore);
pub async fn order_updated<C, S, E>(
    body: web::Bytes,
    api: web::Data<DealSyncApi<C, S, E>>,
) -> Result<HttpResponse, ServerError>
where
    C: CrmGateway,
    S: StorefrontGateway,
    E: EventStore,
{
    let log = start_request(WebhookTopic::OrdersUpdated, &body);
    let payload = read_body(&log, &body)?;
    api.record_event(&log, &payload).await;
    let order = parse_payload::<ShopifyOrder>(&payload).map_err(|e| fail(&log, e))?;
    api.order_updated(&log, &order).await.map_err(|e| fail(&log, e))?;
    Ok(done(&log))
}

route!(product_updated => Post "/api/webhook/shopify/product/upd" impl CrmGateway, StorefrontGateway, EventStore);
pub async fn product_updated<C, S, E>(
    body: web::Bytes,
    api: web::Data<DealSyncApi<C, S, E>>,
) -> Result<HttpResponse, ServerError>
where
    C: CrmGateway,
    S: StorefrontGateway,
    E: EventStore,
{
    let log = start_request(WebhookTopic::ProductsUpdate, &body);
    let payload = read_body(&log, &body)?;
    api.record_event(&log, &payload).await;
    let product = parse_payload::<ShopifyProduct>(&payload).map_err(|e| fail(&log, e))?;
    api.product_updated(&log, &product).await.map_err(|e| fail(&log, e))?;
    Ok(done(&log))
}

route!(refund_created => Post "/api/webhook/shopify/refund/crt" impl CrmGateway, StorefrontGateway, EventStore);
pub async fn refund_created<C, S, E>(
    body: web::Bytes,
    api: web::Data<DealSyncApi<C, S, E>>,
) -> Result<HttpResponse, ServerError>
where
    C: CrmGateway,
    S: StorefrontGateway,
    E: EventStore,
{
    let log = start_request(WebhookTopic::RefundsCreate, &body);
    let payload = read_body(&log, &body)?;
    api.record_event(&log, &payload).await;
    let refund = parse_payload::<ShopifyRefund>(&payload).map_err(|e| fail(&log, e))?;
    api.refund_created(&log, &refund).await.map_err(|e| fail(&log, e))?;
    Ok(done(&log))
}
