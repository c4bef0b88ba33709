use actix_web::{http::StatusCode, test::TestRequest};
use deal_sync_engine::test_utils::{MockCrm, MockEvents, MockStorefront};

use crate::server::MAX_PAYLOAD_SIZE;

use super::helpers::{assert_request_id, mock_api, parse_body, post_json, quiet_events, send_request};

const PRODUCT_PATH: &str = "/api/webhook/shopify/product/upd";

fn untouched_crm() -> MockCrm {
    let mut crm = MockCrm::new();
    crm.expect_find_deals_by_order_id().never();
    crm.expect_create_deal().never();
    crm.expect_update_deal().never();
    crm.expect_set_product_rows().never();
    crm.expect_upsert_contact().never();
    crm
}

#[actix_web::test]
async fn product_update_is_logged_only() {
    let api = mock_api(untouched_crm(), MockStorefront::new(), quiet_events());
    let body = r#"{
        "id": 632910392,
        "title": "IPod Nano - 8GB",
        "handle": "ipod-nano",
        "vendor": "Apple",
        "variants": [
            {"id": 808950810, "product_id": 632910392, "title": "Pink", "sku": "IPOD2008PINK", "price": "199.00", "inventory_quantity": 10},
            {"id": 49148385, "product_id": 632910392, "title": "Red", "sku": "IPOD2008RED", "price": "199.00"}
        ]
    }"#;
    let (status, body) = post_json(PRODUCT_PATH, body, api).await;
    assert_eq!(status, StatusCode::OK);
    let body = parse_body(&body);
    assert_eq!(body["success"], true);
    assert_eq!(body["topic"], "products/update");
    assert_request_id(&body);
}

#[actix_web::test]
async fn product_get_is_not_allowed() {
    let mut events = MockEvents::new();
    events.expect_store_event().never();
    let api = mock_api(untouched_crm(), MockStorefront::new(), events);
    let (status, body) = send_request(TestRequest::get().uri(PRODUCT_PATH), api).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, "Method not allowed");
}

/// A product payload padded out to roughly `size` bytes with a long description.
fn padded_product(size: usize) -> String {
    format!(r#"{{"id": 632910392, "title": "IPod Nano - 8GB", "body_html": "{}", "variants": []}}"#, "x".repeat(size))
}

#[actix_web::test]
async fn large_payloads_are_accepted() {
    let api = mock_api(untouched_crm(), MockStorefront::new(), quiet_events());
    let (status, body) = post_json(PRODUCT_PATH, &padded_product(1024 * 1024), api).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_body(&body)["success"], true);
}

#[actix_web::test]
async fn oversized_payloads_are_rejected() {
    let mut events = MockEvents::new();
    events.expect_store_event().never();
    let api = mock_api(untouched_crm(), MockStorefront::new(), events);
    let (status, _) = post_json(PRODUCT_PATH, &padded_product(MAX_PAYLOAD_SIZE + 1024 * 1024), api).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}
