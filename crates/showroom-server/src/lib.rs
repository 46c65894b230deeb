//! Showroom Server Library
//!
//! HTTP API for a car catalog and a contact form.
//!
//! # Overview
//!
//! - **Catalog**: car documents with their variants; listing views show each
//!   model through its best variant (cheapest, then least powerful)
//! - **Contact**: API-key protected intake that stores the request and
//!   notifies the operator in the background
//! - **Store**: PostgreSQL through SQLx, or an in-memory store when no
//!   database is configured
//! - **Seeding**: bulk import of car documents from a directory of JSON files
//!
//! # Architecture
//!
//! Features are vertical slices (`features/<name>/{commands,queries,routes.rs}`).
//! Handlers depend on the [`db::CarStore`] and [`db::ConnectionRequestStore`]
//! traits rather than on a concrete backend.
//!
//! # Example
//!
//! ```no_run
//! use showroom_server::{api, config::Config, db::Store, notify};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let store = Store::open(&config.database).await?;
//!     let notifier = notify::from_config(&config)?;
//!     let app = api::create_router(api::AppState { store, notifier }, &config);
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;
pub mod notify;
pub mod seed;

// Re-export commonly used types
pub use error::{AppError, AppResult};
