//! Feature modules implementing the showroom API
//!
//! Each feature is a vertical slice with its own commands, queries and routes.
//!
//! # Features
//!
//! - **cars**: catalog writes, listings, grouping and search
//! - **contact**: contact form intake with operator notification
//!
//! # Architecture
//!
//! - `commands/` - Write operations
//! - `queries/` - Read operations
//! - `routes.rs` - HTTP route definitions
//!
//! Commands and queries are plain structs handled by a standalone async
//! `handle` function that receives the store it needs, so they can be tested
//! without HTTP.

pub mod cars;
pub mod contact;

use axum::Router;
use std::sync::Arc;

use crate::{db::Store, middleware::ApiKey, notify::Notifier};

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    pub store: Store,
    pub notifier: Arc<dyn Notifier>,
    pub api_key: ApiKey,
}

/// Creates the feature router
///
/// - `/cars` - Car catalog
/// - `/contact` - Contact form
pub fn router(state: FeatureState) -> Router<()> {
    let contact_state = contact::ContactState {
        requests: state.store.requests.clone(),
        notifier: state.notifier.clone(),
    };

    Router::new()
        .nest("/cars", cars::cars_routes().with_state(state.store.cars.clone()))
        .nest("/contact", contact::contact_routes(contact_state, state.api_key))
}
