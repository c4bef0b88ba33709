use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::{
    config::BitrixConfig,
    data_objects::{ContactFields, DealFields, DealSummary, ProductRow},
    fields,
    BitrixApiError,
};

#[derive(Clone)]
pub struct BitrixApi {
    config: BitrixConfig,
    client: Arc<Client>,
}

/// The envelope every Bitrix24 REST method answers with.
#[derive(Debug, Deserialize)]
struct MethodResponse<T> {
    result: Option<T>,
    error: Option<String>,
    error_description: Option<String>,
}

impl BitrixApi {
    pub fn new(config: BitrixConfig) -> Result<Self, BitrixApiError> {
        if config.webhook_url.is_empty() {
            return Err(BitrixApiError::Initialization("The Bitrix24 webhook URL is empty".into()));
        }
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| BitrixApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// Resolves a REST method name such as `crm.deal.add` (or `/crm.deal.add.json`) against the webhook base URL.
    pub fn method_url(&self, method: &str) -> String {
        let base = self.config.webhook_url.reveal().trim_end_matches('/');
        let method = method.trim_start_matches('/');
        let method = method.strip_suffix(".json").unwrap_or(method);
        format!("{base}/{method}.json")
    }

    /// Calls a REST method with the given payload and deserializes its `result`.
    pub async fn call<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: &str,
        payload: &B,
    ) -> Result<T, BitrixApiError> {
        let url = self.method_url(method);
        trace!("📇 Calling {method}");
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| BitrixApiError::RestResponseError(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| BitrixApiError::RestResponseError(e.to_string()))?;
        parse_method_response(method, status.as_u16(), &body)
    }

    /// `crm.deal.add`. Returns the new deal id.
    pub async fn add_deal(&self, fields: &DealFields) -> Result<i64, BitrixApiError> {
        let id = self.call::<Value, _>("crm.deal.add", &json!({ "fields": fields })).await?;
        let id = value_as_id(&id).ok_or_else(|| BitrixApiError::EmptyResult("crm.deal.add".into()))?;
        debug!("📇 Created deal {id}");
        Ok(id)
    }

    /// `crm.deal.list` filtered on the Shopify order id, newest first.
    pub async fn find_deals_by_order_id(&self, order_id: &str) -> Result<Vec<DealSummary>, BitrixApiError> {
        let mut filter = Map::new();
        filter.insert(fields::SHOPIFY_ORDER_ID.to_string(), json!(order_id));
        let mut order = Map::new();
        order.insert(fields::DATE_CREATE.to_string(), json!("DESC"));
        let payload = json!({ "filter": filter, "select": fields::DEAL_LOOKUP_SELECT, "order": order });
        let deals = list_or_empty(self.call::<Vec<DealSummary>, _>("crm.deal.list", &payload).await)?;
        debug!("📇 {} deal(s) reference order {order_id}", deals.len());
        Ok(deals)
    }

    /// `crm.deal.update`
    pub async fn update_deal(&self, deal_id: i64, fields: &DealFields) -> Result<(), BitrixApiError> {
        let ok = self.call::<Value, _>("crm.deal.update", &json!({ "id": deal_id, "fields": fields })).await?;
        expect_truthy("crm.deal.update", &ok)?;
        debug!("📇 Updated deal {deal_id}");
        Ok(())
    }

    /// `crm.deal.productrows.set`. Replaces every row on the deal with `rows`.
    pub async fn set_product_rows(&self, deal_id: i64, rows: &[ProductRow]) -> Result<(), BitrixApiError> {
        let ok = self.call::<Value, _>("crm.deal.productrows.set", &json!({ "id": deal_id, "rows": rows })).await?;
        expect_truthy("crm.deal.productrows.set", &ok)?;
        debug!("📇 Set {} product row(s) on deal {deal_id}", rows.len());
        Ok(())
    }

    /// Finds a contact by email (or phone, if there is no email) and updates it, or creates a new one. Returns the
    /// contact id, or `None` if the contact has neither an email nor a phone number to match on.
    pub async fn upsert_contact(&self, contact: &ContactFields) -> Result<Option<i64>, BitrixApiError> {
        let filter = match (contact.primary_email(), contact.primary_phone()) {
            (Some(email), _) => json!({ "EMAIL": email }),
            (None, Some(phone)) => json!({ "PHONE": phone }),
            (None, None) => return Ok(None),
        };
        let payload = json!({ "filter": filter, "select": ["ID"] });
        let existing = list_or_empty(self.call::<Vec<Value>, _>("crm.contact.list", &payload).await)?;
        match existing.first().and_then(|c| value_as_id(&c["ID"])) {
            Some(id) => {
                let ok = self
                    .call::<Value, _>("crm.contact.update", &json!({ "id": id, "fields": contact }))
                    .await?;
                expect_truthy("crm.contact.update", &ok)?;
                debug!("📇 Updated contact {id}");
                Ok(Some(id))
            },
            None => {
                let id = self.call::<Value, _>("crm.contact.add", &json!({ "fields": contact })).await?;
                let id = value_as_id(&id).ok_or_else(|| BitrixApiError::EmptyResult("crm.contact.add".into()))?;
                debug!("📇 Created contact {id}");
                Ok(Some(id))
            },
        }
    }
}

fn parse_method_response<T: DeserializeOwned>(method: &str, status: u16, body: &str) -> Result<T, BitrixApiError> {
    let envelope = serde_json::from_str::<MethodResponse<T>>(body);
    match envelope {
        Ok(MethodResponse { error: Some(code), error_description, .. }) => Err(BitrixApiError::MethodError {
            method: method.to_string(),
            code,
            description: error_description.unwrap_or_default(),
        }),
        Ok(_) if !(200..300).contains(&status) => {
            Err(BitrixApiError::QueryError { method: method.to_string(), status, message: body.to_string() })
        },
        Ok(MethodResponse { result: Some(result), .. }) => Ok(result),
        Ok(MethodResponse { result: None, .. }) => Err(BitrixApiError::EmptyResult(method.to_string())),
        Err(_) if !(200..300).contains(&status) => {
            Err(BitrixApiError::QueryError { method: method.to_string(), status, message: body.to_string() })
        },
        Err(e) => Err(BitrixApiError::JsonError(e.to_string())),
    }
}

/// List methods answer `"result": null` when nothing matches. That is an empty list, not an error.
fn list_or_empty<T>(result: Result<Vec<T>, BitrixApiError>) -> Result<Vec<T>, BitrixApiError> {
    match result {
        Err(BitrixApiError::EmptyResult(_)) => Ok(Vec::new()),
        other => other,
    }
}

fn value_as_id(value: &Value) -> Option<i64> {
    let id = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    };
    id.filter(|id| *id > 0)
}

fn expect_truthy(method: &str, value: &Value) -> Result<(), BitrixApiError> {
    match value {
        Value::Bool(false) | Value::Null => Err(BitrixApiError::EmptyResult(method.to_string())),
        _ => Ok(()),
    }
}
