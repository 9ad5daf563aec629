//! WireMock-based Fnugg API mocking infrastructure

use serde_json::Value;
use std::time::Duration;
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// Mock Fnugg API for testing
pub struct MockFnuggServer {
    pub server: MockServer,
    pub base_url: String,
}

impl MockFnuggServer {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base_url = format!("{}/", server.uri());
        Self { server, base_url }
    }

    /// Answer the search endpoint
    pub async fn mock_search(&self, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("size", "150"))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Answer the resort endpoint, expecting exactly `calls` requests
    pub async fn mock_resort(&self, resort_id: &str, response: ResponseTemplate, calls: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/get/resort/{resort_id}/")))
            .and(header("accept", "application/json"))
            .respond_with(response)
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Answer the resort endpoint once, then fall through to later mocks
    pub async fn mock_resort_once(&self, resort_id: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("/get/resort/{resort_id}/")))
            .respond_with(response)
            .up_to_n_times(1)
            .expect(1)
            .mount(&self.server)
            .await;
    }

    pub fn json(body: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(body)
    }

    pub fn status(code: u16) -> ResponseTemplate {
        ResponseTemplate::new(code).set_body_string("upstream failure")
    }

    pub fn delayed(body: Value, delay: Duration) -> ResponseTemplate {
        ResponseTemplate::new(200)
            .set_body_json(body)
            .set_delay(delay)
    }
}
