//! Shared helpers for the HTTP integration tests
//!
//! Every test gets its own router over a fresh in-memory store.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use showroom_common::types::ConnectionRequest;
use showroom_server::{
    api::{create_router, AppState},
    config::Config,
    db::Store,
    notify::{LogNotifier, Notifier, NotifyError},
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "test-contact-key";

pub struct TestApp {
    pub router: Router,
    pub store: Store,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with(test_config(), Arc::new(LogNotifier))
    }

    pub fn with(config: Config, notifier: Arc<dyn Notifier>) -> Self {
        let store = Store::in_memory();
        let router = create_router(
            AppState {
                store: store.clone(),
                notifier,
            },
            &config,
        );
        Self { router, store }
    }

    pub async fn request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| json!(String::from_utf8_lossy(&bytes)))
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.request(json_request(uri, body.to_string(), None)).await
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.contact.api_key = Some(TEST_API_KEY.to_string());
    config
}

pub fn json_request(uri: &str, body: String, api_key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::from(body)).unwrap()
}

/// Car document whose variants are given as (id, price, power in hp)
pub fn car_json(brand: &str, model: &str, country: &str, variants: &[(&str, f64, f64)]) -> Value {
    let variants: Vec<Value> = variants
        .iter()
        .map(|(id, price, power)| {
            json!({
                "variantId": id,
                "variantName": id.to_uppercase(),
                "price": { "amount": price, "currency": "INR" },
                "fuelType": "Petrol",
                "transmission": "Automatic",
                "specifications": { "power": { "value": power, "unit": "hp" } }
            })
        })
        .collect();

    json!({
        "brand": brand,
        "modelName": model,
        "bodyType": "SUV",
        "generation": "First",
        "originCountry": country,
        "baseImageGallery": [format!("/images/{model}.jpg")],
        "variants": variants
    })
}

/// Notifier that forwards every request to a channel
pub struct RecordingNotifier {
    sender: mpsc::UnboundedSender<ConnectionRequest>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new(fail: bool) -> (Arc<Self>, mpsc::UnboundedReceiver<ConnectionRequest>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Arc::new(Self { sender, fail }), receiver)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn notify(&self, request: &ConnectionRequest) -> Result<(), NotifyError> {
        let _ = self.sender.send(request.clone());
        if self.fail {
            return Err(NotifyError::Rejected {
                status: 502,
                body: "gateway down".into(),
            });
        }
        Ok(())
    }
}
