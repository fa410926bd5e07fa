mod common;

use axum::http::StatusCode;
use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use sv_link_batch::api::handlers::{batch_lookup_handler, lookup_handler};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app(server: &MockServer) -> TestServer {
    let state = common::create_test_state(server);
    let app = Router::new()
        .route("/api/lookup", post(lookup_handler))
        .route("/api/batch-lookup", post(batch_lookup_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

async fn provider_with_links() -> MockServer {
    let provider = MockServer::start().await;
    common::mount_listing(
        &provider,
        vec![
            common::listed_link("id-1", "abc", 10, "https://a.example.com"),
            common::listed_link("id-2", "def", 0, "https://b.example.com"),
            common::listed_link("id-3", "ghi", 3, "https://c.example.com"),
        ],
    )
    .await;
    provider
}

#[tokio::test]
async fn test_lookup_pages_through_listing() {
    let provider = provider_with_links().await;
    let server = app(&provider);

    let response = server
        .post("/api/lookup")
        .json(&json!({
            "api_key": common::API_KEY,
            "links": ["https://sv.link/abc", "sv.link/ghi", "missing"]
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let results = json["results"].as_array().unwrap();

    assert_eq!(results[0]["link"], "https://sv.link/abc");
    assert_eq!(results[0]["views"], 10);
    assert_eq!(results[0]["target"], "https://a.example.com");
    assert_eq!(results[0]["created"], "2024-05-01T10:00:00Z");
    assert_eq!(results[0]["success"], true);

    // third link only appears on the second page
    assert_eq!(results[1]["views"], 3);

    assert_eq!(results[2]["views"], "NOT_FOUND");
    assert_eq!(results[2]["success"], false);

    assert_eq!(json["summary"]["total"], 3);
    assert_eq!(json["summary"]["success"], 2);
}

#[tokio::test]
async fn test_lookup_zero_views_is_a_hit() {
    let provider = provider_with_links().await;
    let server = app(&provider);

    let response = server
        .post("/api/lookup")
        .json(&json!({ "api_key": common::API_KEY, "links": ["https://sv.link/def"] }))
        .await;

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["results"][0]["views"], 0);
    assert_eq!(json["results"][0]["success"], true);
}

#[tokio::test]
async fn test_lookup_listing_failure_yields_not_found() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(common::LINKS_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Unauthorized" })))
        .mount(&provider)
        .await;

    let server = app(&provider);
    let response = server
        .post("/api/lookup")
        .json(&json!({ "api_key": common::API_KEY, "links": ["https://sv.link/abc"] }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["results"][0]["views"], "NOT_FOUND");
    assert_eq!(json["summary"]["failed"], 1);
}

#[tokio::test]
async fn test_lookup_missing_api_key() {
    let provider = MockServer::start().await;
    let server = app(&provider);

    let response = server
        .post("/api/lookup")
        .json(&json!({ "links": ["https://sv.link/abc"] }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["message"],
        "Missing API key"
    );
}

#[tokio::test]
async fn test_batch_lookup_returns_link_ids() {
    let provider = provider_with_links().await;
    let server = app(&provider);

    let response = server
        .post("/api/batch-lookup")
        .json(&json!({
            "api_key": common::API_KEY,
            "links": ["https://sv.link/def", "https://sv.link/nope"]
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let results = json["results"].as_array().unwrap();

    assert_eq!(results[0]["linkId"], "id-2");
    assert_eq!(results[0]["target"], "https://b.example.com");
    assert_eq!(results[0]["visit_count"], 0);
    assert_eq!(results[0]["success"], true);

    assert!(results[1]["linkId"].is_null());
    assert_eq!(results[1]["target"], "NOT_FOUND");
    assert_eq!(results[1]["success"], false);
}
