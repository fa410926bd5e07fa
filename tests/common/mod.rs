#![allow(dead_code)]

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use sv_link_batch::domain::context::ProviderSettings;
use sv_link_batch::infrastructure::provider::SvLinkClient;
use sv_link_batch::state::AppState;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-api-key";
pub const LINKS_PATH: &str = "/api/v2/links";

/// Settings pointing at the mock provider, with small pages and batches.
pub fn test_settings(server: &MockServer) -> ProviderSettings {
    ProviderSettings {
        base_url: format!("{}/api/v2", server.uri()),
        domain: "sv.link".to_string(),
        timeout: Duration::from_secs(2),
        page_size: 2,
        max_pages: 5,
        request_delay: Duration::ZERO,
        max_batch_size: 5,
    }
}

pub fn create_test_state(server: &MockServer) -> AppState {
    let client = SvLinkClient::new("sv-link-batch-tests").unwrap();
    AppState::new(Arc::new(client), test_settings(server))
}

pub fn listed_link(id: &str, address: &str, visits: u64, target: &str) -> Value {
    json!({
        "id": id,
        "address": address,
        "visit_count": visits,
        "target": target,
        "created_at": "2024-05-01T10:00:00Z",
        "description": ""
    })
}

/// Serves `links` from `GET /links` in pages of two, followed by an empty page.
pub async fn mount_listing(server: &MockServer, links: Vec<Value>) {
    let pages: Vec<&[Value]> = links.chunks(2).collect();
    let page_count = pages.len();

    for (page, data) in pages.into_iter().enumerate() {
        Mock::given(method("GET"))
            .and(path(LINKS_PATH))
            .and(header("X-API-Key", API_KEY))
            .and(query_param("skip", (page * 2).to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
            .mount(server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path(LINKS_PATH))
        .and(query_param("skip", (page_count * 2).to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(server)
        .await;
}

pub fn decode_content(json: &Value) -> Vec<u8> {
    STANDARD
        .decode(json["content"].as_str().unwrap())
        .unwrap()
}
