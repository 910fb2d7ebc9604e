//! Shared helpers for the consultation integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{self, Request};
use axum::response::Response;
use axum::Router;
use consultation_relay::{api, ConfigProvider, ConsultationService, RelayFailurePolicy, Web3FormsRelay};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

pub const BROWSER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Firefox/128.0";
pub const TEST_ACCESS_KEY: &str = "test-access-key";
pub const RECIPIENT: &str = "office@example.com";

/// Config with the access key held in memory so tests never touch the
/// process environment.
pub struct TestConfig {
    pub endpoint: String,
    pub key: Option<String>,
    pub policy: RelayFailurePolicy,
}

impl ConfigProvider for TestConfig {
    fn relay_endpoint(&self) -> &str {
        &self.endpoint
    }
    fn recipient(&self) -> &str {
        RECIPIENT
    }
    fn access_key_var(&self) -> &str {
        "TEST_ONLY_ACCESS_KEY"
    }
    fn contact_email(&self) -> &str {
        RECIPIENT
    }
    fn contact_phone(&self) -> Option<&str> {
        Some("0113 496 0000")
    }
    fn site_name(&self) -> &str {
        "Example Care"
    }
    fn failure_policy(&self) -> RelayFailurePolicy {
        self.policy
    }
    fn relay_timeout(&self) -> Duration {
        Duration::from_secs(5)
    }
    fn access_key(&self) -> Option<String> {
        self.key.clone()
    }
}

pub fn build_app(
    endpoint: &str,
    key: Option<&str>,
    policy: RelayFailurePolicy,
    expose_diagnostics: bool,
) -> Router {
    let config = TestConfig {
        endpoint: endpoint.to_string(),
        key: key.map(str::to_string),
        policy,
    };
    let relay = Web3FormsRelay::new(endpoint, config.relay_timeout()).expect("build relay client");
    api::router(
        Arc::new(ConsultationService::new(relay, config)),
        expose_diagnostics,
    )
}

/// A payload every check accepts.
pub fn valid_payload() -> serde_json::Value {
    serde_json::json!({
        "firstName": "Margaret",
        "lastName": "Okafor",
        "email": "Margaret@Example.co.uk",
        "phone": "07544 152585",
        "area": "Leeds",
        "careType": "Companionship",
        "relationship": "Son/Daughter",
        "careRecipientName": "Grace Okafor",
        "urgency": "Within 1 week",
        "message": "Mornings <b>only</b>, please",
        "consent": true,
        "honeypot": ""
    })
}

pub fn with(mut payload: serde_json::Value, key: &str, value: serde_json::Value) -> serde_json::Value {
    payload[key] = value;
    payload
}

pub fn without(mut payload: serde_json::Value, key: &str) -> serde_json::Value {
    if let Some(map) = payload.as_object_mut() {
        map.remove(key);
    }
    payload
}

pub fn post_consultation(payload: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(http::Method::POST)
        .uri("/api/consultation")
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::USER_AGENT, BROWSER_AGENT)
        .header("x-forwarded-for", "203.0.113.7")
        .body(Body::from(serde_json::to_vec(payload).expect("serialize payload")))
        .expect("build request")
}

/// Consume a response body and deserialize JSON into `T`.
pub async fn response_json<T: DeserializeOwned>(resp: Response) -> T {
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("deserialize response body")
}

/// In-memory log sink for asserting on what the server logged.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().expect("log buffer lock")).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer lock")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
