#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use rewrite_service::config::{GeminiSettings, RewriteConfig};
use rewrite_service::services::providers::gemini::GeminiTextProvider;
use rewrite_service::services::TextGenerator;
use rewrite_service::startup::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "test-gemini-key-4f1c";
pub const GENERATE_PATH: &str = "/api/generate";
pub const GEMINI_PATH: &str = "/models/gemini-2.5-flash:generateContent";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn assert_cors(&self) {
        assert_eq!(self.headers["access-control-allow-credentials"], "true");
        assert_eq!(self.headers["access-control-allow-origin"], "*");
        assert_eq!(self.headers["access-control-allow-methods"], "POST, OPTIONS");
        assert_eq!(self.headers["access-control-allow-headers"], "Content-Type");
    }
}

pub fn router_with(generator: Arc<dyn TextGenerator>) -> Router {
    build_router(AppState::new(generator))
}

/// Router backed by the real Gemini provider pointed at `base_url`.
pub fn gemini_router(api_key: &str, base_url: &str) -> Router {
    let settings = GeminiSettings::new(api_key)
        .with_api_base_url(base_url)
        .with_timeout(Duration::from_secs(1));
    let provider = GeminiTextProvider::new(&settings).expect("Failed to build provider");
    router_with(Arc::new(provider))
}

pub fn test_config(port: u16) -> RewriteConfig {
    RewriteConfig {
        common: service_core::config::Config {
            host: "127.0.0.1".parse().unwrap(),
            port,
            log_level: "debug".to_string(),
        },
        gemini: GeminiSettings::new(TEST_API_KEY),
        otlp_endpoint: None,
    }
}

pub async fn send_raw(app: Router, method: Method, body: Body, json: bool) -> TestResponse {
    let mut request = Request::builder().method(method).uri(GENERATE_PATH);
    if json {
        request = request.header("content-type", "application/json");
    }

    let response = app
        .oneshot(request.body(body).unwrap())
        .await
        .expect("Failed to execute request");

    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn post_json(app: Router, payload: Value) -> TestResponse {
    send_raw(app, Method::POST, Body::from(payload.to_string()), true).await
}
