use actix_web::{http::StatusCode, test::TestRequest};
use bitrix_tools::DealSummary;
use deal_sync_engine::{
    test_utils::{MockCrm, MockStorefront},
    CrmGatewayError,
};
use shopify_tools::{FinancialStatus, OrderBuilder};
use sync_common::Money;

use super::helpers::{mock_api, parse_body, post_json, quiet_events, send_request};

const REFUND_PATH: &str = "/api/webhook/shopify/refund/crt";

const REFUND_JSON: &str = r#"{
    "id": 509562969,
    "order_id": 450789469,
    "created_at": "2024-03-01T13:05:21-05:00",
    "note": "Customer changed their mind",
    "refund_line_items": [{"id": 104689539, "line_item_id": 1, "quantity": 1, "subtotal": "199.00", "total_tax": "3.98"}],
    "transactions": [
        {"id": 179259969, "kind": "refund", "status": "success", "amount": "209.00", "currency": "EUR"},
        {"id": 179259970, "kind": "refund", "status": "failure", "amount": "209.00", "currency": "EUR"}
    ]
}"#;

#[actix_web::test]
async fn refund_without_deal() {
    let mut crm = MockCrm::new();
    crm.expect_find_deals_by_order_id().times(1).returning(|_| Ok(vec![]));
    crm.expect_update_deal().never();
    crm.expect_set_product_rows().never();
    crm.expect_create_deal().never();
    let mut storefront = MockStorefront::new();
    storefront.expect_fetch_order().never();
    let api = mock_api(crm, storefront, quiet_events());
    let (status, body) = post_json(REFUND_PATH, REFUND_JSON, api).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_body(&body)["topic"], "refunds/create");
}

#[actix_web::test]
async fn full_refund() {
    let mut crm = MockCrm::new();
    crm.expect_find_deals_by_order_id().returning(|_| {
        Ok(vec![DealSummary { id: 12, category_id: None, stage_id: Some("C2:EXECUTING".into()), ..Default::default() }])
    });
    crm.expect_update_deal()
        .withf(|id, f| {
            *id == 12 && f.payment_status.as_deref() == Some("58") && f.stage_id.as_deref() == Some("C2:LOSE")
        })
        .times(1)
        .returning(|_, _| Ok(()));
    crm.expect_set_product_rows().times(1).returning(|_, _| Ok(()));
    let mut storefront = MockStorefront::new();
    storefront.expect_fetch_order().times(1).returning(|id| {
        Ok(Some(
            OrderBuilder::new()
                .id(id)
                .financial_status(FinancialStatus::Refunded)
                .line_item("IPod Nano - 8gb", Some("IPOD2008GREEN"), Money::from_cents(20_900), 1)
                .build(),
        ))
    });
    let api = mock_api(crm, storefront, quiet_events());
    let (status, _) = post_json(REFUND_PATH, REFUND_JSON, api).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn refund_crm_failures_after_lookup_are_swallowed() {
    let mut crm = MockCrm::new();
    crm.expect_find_deals_by_order_id()
        .returning(|_| Ok(vec![DealSummary { id: 13, category_id: Some(2), ..Default::default() }]));
    crm.expect_update_deal().times(1).returning(|_, _| Err(CrmGatewayError::Rejected("locked".into())));
    crm.expect_set_product_rows().times(1).returning(|_, _| Err(CrmGatewayError::RequestFailed("reset".into())));
    let mut storefront = MockStorefront::new();
    storefront.expect_fetch_order().returning(|id| {
        Ok(Some(OrderBuilder::new().id(id).line_item("Case", None, Money::from_cents(1_000), 1).build()))
    });
    let api = mock_api(crm, storefront, quiet_events());
    let (status, _) = post_json(REFUND_PATH, REFUND_JSON, api).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn refund_lookup_failure() {
    let mut crm = MockCrm::new();
    crm.expect_find_deals_by_order_id().returning(|_| Err(CrmGatewayError::RequestFailed("down".into())));
    let api = mock_api(crm, MockStorefront::new(), quiet_events());
    let (status, body) = post_json(REFUND_PATH, REFUND_JSON, api).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(parse_body(&body)["error"], "Internal server error");
}

#[actix_web::test]
async fn refund_put_is_not_allowed() {
    let mut crm = MockCrm::new();
    crm.expect_find_deals_by_order_id().never();
    let api = mock_api(crm, MockStorefront::new(), quiet_events());
    let req = TestRequest::put().uri(REFUND_PATH).set_payload(REFUND_JSON);
    let (status, _) = send_request(req, api).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
