//! Showroom Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, selection rules, and error handling for the Showroom workspace.
//!
//! # Overview
//!
//! - **Types**: car, variant, and contact-request documents as they travel
//!   over HTTP and into the store
//! - **Selection**: the best-variant rule used by every catalog summary view
//! - **Error Handling**: the common error type and result alias
//! - **Logging**: subscriber initialisation shared by the server and the seeder
//!
//! # Example
//!
//! ```no_run
//! use showroom_common::selection::select_best_variant;
//! use showroom_common::types::CarDraft;
//!
//! fn cheapest_trim(car: &CarDraft) -> Option<&str> {
//!     select_best_variant(&car.variants).map(|v| v.variant_name.as_str())
//! }
//! ```

pub mod error;
pub mod logging;
pub mod selection;
pub mod types;

// Re-export commonly used types
pub use error::{Result, ShowroomError};
