//! Middleware for the showroom server
//!
//! This module provides middleware for:
//! - CORS (Cross-Origin Resource Sharing)
//! - Request logging with tracing
//! - Shared-secret checks on the contact endpoint

use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::{sync::Arc, time::Duration};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{config::CorsConfig, error::AppError};

/// Header carrying the contact form secret
pub const API_KEY_HEADER: &str = "x-api-key";

/// Create CORS layer from configuration.
///
/// An empty origin list allows no cross-origin callers. `*` allows any
/// origin, in which case credentials are never allowed.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(API_KEY_HEADER),
        ])
        .max_age(Duration::from_secs(3600));

    if config.allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            },
        })
        .collect();

    cors.allow_origin(origins)
        .allow_credentials(config.allow_credentials)
}

/// Create tracing/logging layer
pub fn tracing_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(tower_http::LatencyUnit::Micros),
        )
}

/// Expected contact secret; `None` rejects every request
#[derive(Clone, Default)]
pub struct ApiKey(pub Option<Arc<str>>);

impl ApiKey {
    pub fn new(key: Option<&str>) -> Self {
        Self(key.map(Arc::from))
    }

    fn matches(&self, presented: Option<&str>) -> bool {
        match (&self.0, presented) {
            (Some(expected), Some(presented)) => expected.as_ref() == presented,
            _ => false,
        }
    }
}

/// Reject requests whose `x-api-key` header does not match the configured key.
///
/// Runs before body extraction, so unauthorised submissions are never parsed
/// or stored.
pub async fn require_api_key(
    State(key): State<ApiKey>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if !key.matches(presented) {
        tracing::warn!(
            header_present = presented.is_some(),
            "Rejected request with invalid API key"
        );
        return AppError::Unauthorized("Invalid or missing API key".to_string()).into_response();
    }

    next.run(request).await
}
