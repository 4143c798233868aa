use actix_web::{
    http::StatusCode,
    test::{self, TestRequest},
    web,
    App,
};
use pos_ingest_engine::ingest::ingest_channel;
use serde_json::json;

use crate::{
    data_objects::{AcceptedResponse, InfoResponse},
    routes::{index, webhook},
};

// Each test keeps the receiver half alive; dropping it would close the
// channel and turn every enqueue into a rejection.

#[actix_web::test]
async fn liveness_route_answers() {
    let (queue, _receiver) = ingest_channel(4);
    let app = test::init_service(App::new().app_data(web::Data::new(queue)).service(index)).await;
    let req = TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: InfoResponse = test::read_body_json(resp).await;
    assert!(body.message.contains("Webhook live"));
}

#[actix_web::test]
async fn webhook_accepts_a_json_object() {
    let (queue, _receiver) = ingest_channel(4);
    let app = test::init_service(App::new().app_data(web::Data::new(queue)).service(webhook)).await;
    let req = TestRequest::post().uri("/webhook").set_json(json!({"event": "order_placed"})).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let body: AcceptedResponse = test::read_body_json(resp).await;
    assert_eq!(body.status, "accepted");
}

#[actix_web::test]
async fn webhook_accepts_without_validating_the_schema() {
    // Structurally bogus order data is the worker's problem, not this
    // endpoint's.
    let (queue, _receiver) = ingest_channel(4);
    let app = test::init_service(App::new().app_data(web::Data::new(queue)).service(webhook)).await;
    let req = TestRequest::post().uri("/webhook").set_json(json!({"properties": "not even close"})).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
}

#[actix_web::test]
async fn webhook_rejects_unparseable_bodies() {
    let (queue, _receiver) = ingest_channel(4);
    let app = test::init_service(App::new().app_data(web::Data::new(queue)).service(webhook)).await;
    let req = TestRequest::post().uri("/webhook").set_payload("{not json").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn webhook_rejects_non_object_json() {
    let (queue, _receiver) = ingest_channel(4);
    let app = test::init_service(App::new().app_data(web::Data::new(queue)).service(webhook)).await;
    let req = TestRequest::post().uri("/webhook").set_json(json!([1, 2, 3])).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn full_queue_returns_service_unavailable() {
    // Capacity two and no worker draining: the third delivery bounces.
    let (queue, _receiver) = ingest_channel(2);
    let app = test::init_service(App::new().app_data(web::Data::new(queue)).service(webhook)).await;
    for _ in 0..2 {
        let req = TestRequest::post().uri("/webhook").set_json(json!({"event": "order_placed"})).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::ACCEPTED);
    }
    let req = TestRequest::post().uri("/webhook").set_json(json!({"event": "order_placed"})).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = test::read_body(resp).await;
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(body["error"].as_str().unwrap().contains("queue is at capacity"));
}
