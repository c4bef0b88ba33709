use std::fmt::Debug;

use bitrix_tools::{DealFields, DealSummary, ProductRow};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shopify_tools::{ShopifyOrder, ShopifyProduct, ShopifyRefund};

use crate::{
    mapper::{contact_from_order, map_order_to_deal, DealSchema, DealStage, PaymentStatus},
    traits::{CrmGateway, EventStore, StorefrontGateway},
    DealSyncError,
    RequestLogger,
    WebhookTopic,
};

/// What an order webhook did to the CRM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Created(i64),
    Updated(i64),
    /// The event did not correspond to any deal, so nothing was written.
    Skipped,
}

impl SyncOutcome {
    pub fn deal_id(&self) -> Option<i64> {
        match self {
            Self::Created(id) | Self::Updated(id) => Some(*id),
            Self::Skipped => None,
        }
    }
}

/// `DealSyncApi` is the entry point for every storefront webhook. It reconciles the CRM deal pipeline with the
/// storefront's view of an order.
///
/// Each method performs a single best-effort pass: lookups and deal creation are fatal, while secondary writes
/// (contacts, product rows, event storage and, on updates, the deal fields themselves) are logged and swallowed.
pub struct DealSyncApi<C, S, E> {
    crm: C,
    storefront: S,
    events: E,
    schema: DealSchema,
}

impl<C, S, E> Debug for DealSyncApi<C, S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DealSyncApi ({:?})", self.schema)
    }
}

impl<C, S, E> DealSyncApi<C, S, E> {
    pub fn new(crm: C, storefront: S, events: E, schema: DealSchema) -> Self {
        Self { crm, storefront, events, schema }
    }

    pub fn schema(&self) -> &DealSchema {
        &self.schema
    }
}

/// Deserializes a webhook body into the payload type for its topic.
pub fn parse_payload<T: DeserializeOwned>(payload: &Value) -> Result<T, DealSyncError> {
    T::deserialize(payload).map_err(|e| DealSyncError::InvalidPayload(e.to_string()))
}

impl<C, S, E> DealSyncApi<C, S, E>
where
    C: CrmGateway,
    S: StorefrontGateway,
    E: EventStore,
{
    /// Hands the raw event to the event store. Failures are logged and otherwise ignored.
    pub async fn record_event(&self, log: &RequestLogger, payload: &Value) {
        match self.events.store_event(log.request_id(), log.topic(), payload).await {
            Ok(()) => log.trace("🔄️ Event stored"),
            Err(e) => log.warn(format_args!("🔄️ Failed to store event. {e}")),
        }
    }

    /// `orders/create`: creates a new deal for the order and returns its id.
    pub async fn order_created(&self, log: &RequestLogger, order: &ShopifyOrder) -> Result<i64, DealSyncError> {
        check_order_id(order.id)?;
        log.info(format_args!(
            "🔄️📦️ New order {} ({}, {} line items, total {})",
            order.label(),
            order.financial_status(),
            order.line_items.len(),
            order.effective_total()
        ));
        self.create_deal(log, order).await
    }

    /// `orders/updated`: finds the deal for the order and refreshes it, or creates one if the order has never been
    /// seen before.
    pub async fn order_updated(&self, log: &RequestLogger, order: &ShopifyOrder) -> Result<SyncOutcome, DealSyncError> {
        check_order_id(order.id)?;
        log.info(format_args!(
            "🔄️📝️ Order {} updated ({}, {} line items, total {})",
            order.label(),
            order.financial_status(),
            order.line_items.len(),
            order.effective_total()
        ));
        let order_id = order.id.to_string();
        let deals = self.find_deals(log, &order_id).await?;
        let Some(deal) = self.pick_deal(log, &order_id, &deals) else {
            log.warn(format_args!("🔄️📝️ No deal found for order {order_id}. Creating a new one."));
            let deal_id = self.create_deal(log, order).await?;
            return Ok(SyncOutcome::Created(deal_id));
        };
        let mapping = map_order_to_deal(order, &self.schema);
        let current_category = self.schema.category_or_stock(deal.category_id);
        let fields = mapping.update_fields(current_category);
        if let Some(category) = fields.category_id {
            log.info(format_args!("🔄️📝️ Deal {} moves from category {current_category} to {category}", deal.id));
        }
        if fields.stage_id != deal.stage_id {
            log.info(format_args!(
                "🔄️📝️ Deal {} stage {} → {}",
                deal.id,
                deal.stage_id.as_deref().unwrap_or("(none)"),
                fields.stage_id.as_deref().unwrap_or_default()
            ));
        }
        log.debug(format_args!(
            "🔄️📝️ Payment status {} (financial status {})",
            fields.payment_status.as_deref().unwrap_or_default(),
            order.financial_status()
        ));
        self.try_update_deal(log, deal.id, &fields).await;
        self.try_set_product_rows(log, deal.id, &mapping.rows).await;
        Ok(SyncOutcome::Updated(deal.id))
    }

    /// `products/update`: the catalogue mapping is not maintained yet, so the variants are only logged. No deal is
    /// touched.
    pub async fn product_updated(&self, log: &RequestLogger, product: &ShopifyProduct) -> Result<(), DealSyncError> {
        log.info(format_args!(
            "🔄️🏷️ Product {} [{}] updated. handle: {}, vendor: {}, {} variants",
            product.id,
            product.label(),
            product.handle,
            product.vendor.as_deref().unwrap_or("n/a"),
            product.variants.len()
        ));
        for (i, variant) in product.variants.iter().enumerate() {
            log.debug(format_args!(
                "🔄️🏷️ Variant {}: id {}, sku {}, title {}, price {}, inventory {}",
                i + 1,
                variant.id,
                variant.sku.as_deref().unwrap_or("n/a"),
                variant.title,
                variant.price,
                variant.inventory_quantity.map(|q| q.to_string()).unwrap_or_else(|| "n/a".into())
            ));
        }
        Ok(())
    }

    /// `refunds/create`: re-fetches the refunded order and brings the deal's totals, payment status and rows in line
    /// with it.
    ///
    /// Only the deal lookup can fail the request. The refund has already happened in the storefront, so every error
    /// after that is logged and swallowed.
    pub async fn refund_created(&self, log: &RequestLogger, refund: &ShopifyRefund) -> Result<SyncOutcome, DealSyncError> {
        check_order_id(refund.order_id)?;
        let refund_amount = refund.refund_amount();
        log.info(format_args!(
            "🔄️💸️ Refund {} of {refund_amount} {} on order {}. {} refunded line items",
            refund.id,
            refund.currency.as_deref().unwrap_or_default(),
            refund.order_id,
            refund.refund_line_items.len()
        ));
        let order_id = refund.order_id.to_string();
        let deals = self.find_deals(log, &order_id).await?;
        let Some(deal) = self.pick_deal(log, &order_id, &deals) else {
            log.info(format_args!("🔄️💸️ No deal found for order {order_id}. Nothing to do."));
            return Ok(SyncOutcome::Skipped);
        };
        let order = match self.storefront.fetch_order(refund.order_id).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                log.error(format_args!("🔄️💸️ Order {order_id} was not found in the storefront"));
                return Ok(SyncOutcome::Skipped);
            },
            Err(e) => {
                log.error(format_args!("🔄️💸️ Could not fetch order {order_id}. {e}"));
                return Ok(SyncOutcome::Skipped);
            },
        };
        let mapping = map_order_to_deal(&order, &self.schema);
        let mut fields = mapping.totals();
        if refund_amount >= order.total_price {
            let category = self.schema.category_or_stock(deal.category_id);
            log.info(format_args!("🔄️💸️ Order {order_id} is fully refunded"));
            fields.payment_status = Some(PaymentStatus::Unpaid.enum_id(&self.schema).to_string());
            fields.stage_id = Some(DealStage::Refunded.stage_id(category));
        } else if refund_amount.is_positive() {
            log.info(format_args!("🔄️💸️ Order {order_id} is partially refunded"));
            fields.payment_status = Some(PaymentStatus::Unpaid.enum_id(&self.schema).to_string());
        }
        self.try_update_deal(log, deal.id, &fields).await;
        if !mapping.rows.is_empty() {
            self.try_set_product_rows(log, deal.id, &mapping.rows).await;
        }
        Ok(SyncOutcome::Updated(deal.id))
    }

    async fn find_deals(&self, log: &RequestLogger, order_id: &str) -> Result<Vec<DealSummary>, DealSyncError> {
        let deals = self.crm.find_deals_by_order_id(order_id).await.map_err(|source| {
            log.error(format_args!("🔄️ Deal lookup for order {order_id} failed. {source}"));
            DealSyncError::DealLookupFailed { order_id: order_id.to_string(), source }
        })?;
        log.debug(format_args!("🔄️ Found {} deal(s) for order {order_id}", deals.len()));
        Ok(deals)
    }

    /// Picks the deal to work on. Duplicates are a data problem this service does not repair: the most recently
    /// created deal wins.
    fn pick_deal<'a>(&self, log: &RequestLogger, order_id: &str, deals: &'a [DealSummary]) -> Option<&'a DealSummary> {
        if deals.len() > 1 {
            let ids = deals.iter().map(|d| d.id.to_string()).collect::<Vec<_>>().join(", ");
            log.warn(format_args!(
                "🔄️ Data error: {} deals reference order {order_id} ({ids}). Using the most recent, #{}",
                deals.len(),
                deals[0].id
            ));
        }
        deals.first()
    }

    async fn create_deal(&self, log: &RequestLogger, order: &ShopifyOrder) -> Result<i64, DealSyncError> {
        let mapping = map_order_to_deal(order, &self.schema);
        let mut fields = mapping.fields;
        log.debug(format_args!("🔄️📦️ Order {} goes into the {} pipeline", order.label(), mapping.category));
        fields.contact_id = self.try_upsert_contact(log, order).await;
        let deal_id = self.crm.create_deal(&fields).await.map_err(|source| {
            log.error(format_args!("🔄️📦️ Failed to create a deal for order {}. {source}", order.label()));
            DealSyncError::DealCreationFailed { order_id: order.id.to_string(), source }
        })?;
        log.info(format_args!("🔄️📦️ Created deal #{deal_id} for order {}", order.label()));
        if !mapping.rows.is_empty() {
            self.try_set_product_rows(log, deal_id, &mapping.rows).await;
        }
        Ok(deal_id)
    }

    async fn try_upsert_contact(&self, log: &RequestLogger, order: &ShopifyOrder) -> Option<i64> {
        let contact = contact_from_order(order)?;
        match self.crm.upsert_contact(&contact).await {
            Ok(id) => {
                log.debug(format_args!("🔄️👤️ Contact for order {}: {id:?}", order.label()));
                id
            },
            Err(e) => {
                log.warn(format_args!("🔄️👤️ Contact upsert failed. The deal is created without one. {e}"));
                None
            },
        }
    }

    async fn try_update_deal(&self, log: &RequestLogger, deal_id: i64, fields: &DealFields) {
        match self.crm.update_deal(deal_id, fields).await {
            Ok(()) => log.info(format_args!("🔄️ Deal #{deal_id} updated")),
            Err(e) => log.error(format_args!("🔄️ Failed to update deal #{deal_id}. {e}")),
        }
    }

    async fn try_set_product_rows(&self, log: &RequestLogger, deal_id: i64, rows: &[ProductRow]) {
        match self.crm.set_product_rows(deal_id, rows).await {
            Ok(()) => log.info(format_args!("🔄️ {} product row(s) set on deal #{deal_id}", rows.len())),
            Err(e) => log.error(format_args!("🔄️ Failed to set product rows on deal #{deal_id}. {e}")),
        }
    }
}

fn check_order_id(id: i64) -> Result<(), DealSyncError> {
    if id > 0 {
        Ok(())
    } else {
        Err(DealSyncError::InvalidPayload(format!("{id} is not a valid order id")))
    }
}
