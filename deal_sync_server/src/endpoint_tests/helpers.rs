use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web, web::ServiceConfig, App};
use deal_sync_engine::{
    test_utils::{MockCrm, MockEvents, MockStorefront},
    DealSchema,
    DealSyncApi,
};
use log::debug;
use serde_json::Value;

use crate::server::configure_webhooks;

pub type MockApi = DealSyncApi<MockCrm, MockStorefront, MockEvents>;

/// A `MockEvents` that accepts any number of events.
pub fn quiet_events() -> MockEvents {
    let mut events = MockEvents::new();
    events.expect_store_event().returning(|_, _, _| Ok(()));
    events
}

pub fn mock_api(crm: MockCrm, storefront: MockStorefront, events: MockEvents) -> MockApi {
    DealSyncApi::new(crm, storefront, events, DealSchema::default())
}

pub async fn send_request(req: TestRequest, api: MockApi) -> (StatusCode, String) {
    let _ = env_logger::try_init().ok();
    let data = web::Data::new(api);
    let configure = move |cfg: &mut ServiceConfig| {
        cfg.app_data(data);
        configure_webhooks::<MockCrm, MockStorefront, MockEvents>(cfg);
    };
    let app = App::new().configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = res.into_body().try_into_bytes().unwrap_or_default();
    (status, String::from_utf8_lossy(&body).into_owned())
}

pub async fn post_json(path: &str, body: &str, api: MockApi) -> (StatusCode, String) {
    let req = TestRequest::post().uri(path).insert_header(("Content-Type", "application/json")).set_payload(body.to_string());
    send_request(req, api).await
}

pub fn parse_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|e| panic!("Response is not JSON ({e}): {body}"))
}

/// Asserts that `requestId` has the `{millis}-{9 base36 chars}` shape.
pub fn assert_request_id(value: &Value) {
    let id = value["requestId"].as_str().expect("requestId is missing");
    let (millis, suffix) = id.split_once('-').expect("requestId has no separator");
    assert!(millis.chars().all(|c| c.is_ascii_digit()), "{id}");
    assert_eq!(suffix.len(), 9, "{id}");
}
