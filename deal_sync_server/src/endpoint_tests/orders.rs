use actix_web::{http::StatusCode, test::TestRequest};
use bitrix_tools::DealSummary;
use deal_sync_engine::{
    test_utils::{MockCrm, MockStorefront},
    CrmGatewayError,
    WebhookTopic,
};

use super::helpers::{assert_request_id, mock_api, parse_body, post_json, quiet_events, send_request};

const CREATE_PATH: &str = "/api/webhook/shopify/order/crt";
const UPDATE_PATH: &str = "/api/webhook/shopify/order/upd";

const ORDER_JSON: &str = r##"{
    "id": 450789469,
    "name": "#1001",
    "email": "bob.norman@example.com",
    "currency": "EUR",
    "financial_status": "paid",
    "total_price": "409.94",
    "total_tax": "11.94",
    "total_discounts": "3.33",
    "tags": "vip, pre-order",
    "line_items": [
        {"id": 1, "title": "IPod Nano - 8gb", "sku": "IPOD2008GREEN", "quantity": 1, "price": "199.00"},
        {"id": 2, "title": "IPod Nano - 8gb", "variant_title": "Pink", "sku": "IPOD2008PINK", "quantity": 1, "price": "199.00"}
    ]
}"##;

#[actix_web::test]
async fn create_order() {
    let mut crm = MockCrm::new();
    crm.expect_upsert_contact().times(1).returning(|_| Ok(Some(5)));
    crm.expect_create_deal()
        .withf(|f| f.shopify_order_id.as_deref() == Some("450789469") && f.category_id == Some(8))
        .times(1)
        .returning(|_| Ok(321));
    crm.expect_set_product_rows().withf(|id, rows| *id == 321 && rows.len() == 2).times(1).returning(|_, _| Ok(()));
    let api = mock_api(crm, MockStorefront::new(), quiet_events());
    let (status, body) = post_json(CREATE_PATH, ORDER_JSON, api).await;
    assert_eq!(status, StatusCode::OK);
    let body = parse_body(&body);
    assert_eq!(body["success"], true);
    assert_eq!(body["topic"], "orders/create");
    assert_request_id(&body);
}

#[actix_web::test]
async fn create_order_crm_failure() {
    let mut crm = MockCrm::new();
    crm.expect_upsert_contact().returning(|_| Ok(None));
    crm.expect_create_deal().times(1).returning(|_| Err(CrmGatewayError::Rejected("ACCESS_DENIED".into())));
    crm.expect_set_product_rows().never();
    let api = mock_api(crm, MockStorefront::new(), quiet_events());
    let (status, body) = post_json(CREATE_PATH, ORDER_JSON, api).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = parse_body(&body);
    assert_eq!(body["error"], "Internal server error");
    assert!(body["message"].as_str().unwrap().contains("ACCESS_DENIED"));
    assert_request_id(&body);
}

#[actix_web::test]
async fn create_order_event_store_failure_is_ignored() {
    let mut crm = MockCrm::new();
    crm.expect_upsert_contact().returning(|_| Ok(None));
    crm.expect_create_deal().times(1).returning(|_| Ok(322));
    crm.expect_set_product_rows().returning(|_, _| Ok(()));
    let mut events = deal_sync_engine::test_utils::MockEvents::new();
    events
        .expect_store_event()
        .withf(|_, topic, payload| *topic == WebhookTopic::OrdersCreate && payload["id"] == 450789469)
        .times(1)
        .returning(|_, _, _| Err(deal_sync_engine::EventStoreError("unavailable".into())));
    let api = mock_api(crm, MockStorefront::new(), events);
    let (status, _) = post_json(CREATE_PATH, ORDER_JSON, api).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn invalid_json_is_rejected() {
    let mut crm = MockCrm::new();
    crm.expect_create_deal().never();
    let mut events = deal_sync_engine::test_utils::MockEvents::new();
    events.expect_store_event().never();
    let api = mock_api(crm, MockStorefront::new(), events);
    let (status, body) = post_json(CREATE_PATH, "{\"id\": 1,", api).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = parse_body(&body);
    assert_eq!(body["error"], "Invalid payload");
    assert_request_id(&body);
}

#[actix_web::test]
async fn wrong_payload_shape_is_rejected() {
    let mut crm = MockCrm::new();
    crm.expect_create_deal().never();
    let api = mock_api(crm, MockStorefront::new(), quiet_events());
    let (status, body) = post_json(CREATE_PATH, r#"{"id": "not-a-number"}"#, api).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_request_id(&parse_body(&body));
}

#[actix_web::test]
async fn get_is_not_allowed() {
    for path in [CREATE_PATH, UPDATE_PATH] {
        let mut crm = MockCrm::new();
        crm.expect_create_deal().never();
        crm.expect_find_deals_by_order_id().never();
        let mut events = deal_sync_engine::test_utils::MockEvents::new();
        events.expect_store_event().never();
        let api = mock_api(crm, MockStorefront::new(), events);
        let (status, body) = send_request(TestRequest::get().uri(path), api).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, "Method not allowed");
    }
}

#[actix_web::test]
async fn update_order_existing_deal() {
    let mut crm = MockCrm::new();
    crm.expect_find_deals_by_order_id().withf(|id| id == "450789469").times(1).returning(|_| {
        Ok(vec![DealSummary { id: 77, category_id: Some(8), stage_id: Some("C8:NEW".into()), ..Default::default() }])
    });
    crm.expect_create_deal().never();
    crm.expect_update_deal()
        .withf(|id, f| *id == 77 && f.category_id.is_none() && f.stage_id.as_deref() == Some("C8:EXECUTING"))
        .times(1)
        .returning(|_, _| Ok(()));
    crm.expect_set_product_rows().withf(|id, rows| *id == 77 && rows.len() == 2).times(1).returning(|_, _| Ok(()));
    let api = mock_api(crm, MockStorefront::new(), quiet_events());
    let (status, body) = post_json(UPDATE_PATH, ORDER_JSON, api).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_body(&body)["topic"], "orders/updated");
}

#[actix_web::test]
async fn update_order_lookup_failure() {
    let mut crm = MockCrm::new();
    crm.expect_find_deals_by_order_id().returning(|_| Err(CrmGatewayError::RequestFailed("timed out".into())));
    crm.expect_create_deal().never();
    let api = mock_api(crm, MockStorefront::new(), quiet_events());
    let (status, body) = post_json(UPDATE_PATH, ORDER_JSON, api).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = parse_body(&body);
    assert_eq!(body["error"], "Internal server error");
    assert!(body["message"].as_str().unwrap().contains("450789469"));
}

#[actix_web::test]
async fn health_check() {
    let api = mock_api(MockCrm::new(), MockStorefront::new(), quiet_events());
    let (status, body) = send_request(TestRequest::get().uri("/health"), api).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "👍️\n");
}
