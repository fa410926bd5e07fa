mod common;

use axum::http::StatusCode;
use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use sv_link_batch::api::handlers::batch_update_handler;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app(server: &MockServer) -> TestServer {
    let state = common::create_test_state(server);
    let app = Router::new()
        .route("/api/batch-update", post(batch_update_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_update_success() {
    let provider = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v2/links/id-1"))
        .and(header("X-API-Key", common::API_KEY))
        .and(body_json(json!({
            "target": "https://new.example.com",
            "address": "abc"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "id-1" })))
        .expect(1)
        .mount(&provider)
        .await;

    let server = app(&provider);
    let response = server
        .post("/api/batch-update")
        .json(&json!({
            "api_key": common::API_KEY,
            "changes": [{
                "linkId": "id-1",
                "shortUrl": "https://sv.link/abc",
                "newTarget": "https://new.example.com"
            }]
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["results"][0]["shortUrl"], "https://sv.link/abc");
    assert_eq!(json["results"][0]["newTarget"], "https://new.example.com");
    assert_eq!(json["results"][0]["success"], true);
    assert_eq!(json["results"][0]["message"], "Updated");
    assert!(json["results"][0].get("error").is_none());
}

#[tokio::test]
async fn test_update_failures_are_per_item() {
    let provider = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v2/links/id-2"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Link not found" })),
        )
        .mount(&provider)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v2/links/id-3"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&provider)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v2/links/id-4"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&provider)
        .await;

    let server = app(&provider);
    let response = server
        .post("/api/batch-update")
        .json(&json!({
            "api_key": common::API_KEY,
            "changes": [
                { "linkId": "id-2", "shortUrl": "https://sv.link/b", "newTarget": "https://x.example.com" },
                { "shortUrl": "https://sv.link/none", "newTarget": "https://y.example.com" },
                { "linkId": "id-3", "shortUrl": "https://sv.link/c", "newTarget": "https://z.example.com" },
                { "linkId": "id-4", "shortUrl": "https://sv.link/d", "newTarget": "https://w.example.com" }
            ]
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let results = json["results"].as_array().unwrap();

    assert_eq!(results[0]["error"], "Link not found");
    assert_eq!(results[1]["error"], "Missing required parameter");
    assert_eq!(results[2]["error"], "HTTP 500");
    assert_eq!(results[3]["success"], true);

    assert_eq!(json["summary"]["success"], 1);
    assert_eq!(json["summary"]["failed"], 3);
}

#[tokio::test]
async fn test_update_empty_changes() {
    let provider = MockServer::start().await;
    let server = app(&provider);

    let response = server
        .post("/api/batch-update")
        .json(&json!({ "api_key": common::API_KEY, "changes": [] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["message"],
        "No items to process"
    );
}

#[tokio::test]
async fn test_update_dot_segment_ids_never_reach_provider() {
    let provider = MockServer::start().await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&provider)
        .await;

    let server = app(&provider);
    let response = server
        .post("/api/batch-update")
        .json(&json!({
            "api_key": common::API_KEY,
            "changes": [
                { "linkId": "..", "shortUrl": "https://sv.link/a", "newTarget": "https://x.example.com" },
                { "linkId": ".", "shortUrl": "https://sv.link/b", "newTarget": "https://y.example.com" },
                { "linkId": "../other", "shortUrl": "https://sv.link/c", "newTarget": "https://z.example.com" }
            ]
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let results = json["results"].as_array().unwrap();
    assert_eq!(results[0]["error"], "Invalid link id");
    assert_eq!(results[1]["error"], "Invalid link id");
    assert_eq!(results[2]["success"], true);

    let requests = provider.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.path(), "/api/v2/links/..%2Fother");
}
