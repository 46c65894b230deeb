//! Catalog read operations
//!
//! Every capped query returns at most [`LIST_LIMIT`](crate::db::LIST_LIMIT)
//! cars. Listing views are built with
//! [`summarize`](showroom_common::selection::summarize).

pub mod all;
pub mod by_country;
pub mod distinct;
pub mod list;
pub mod models;
pub mod search;

use crate::db::StoreError;

pub use all::AllCarsQuery;
pub use by_country::{CarsByCountryQuery, CarsByCountryResponse};
pub use distinct::{DistinctValuesQuery, SearchValuesQuery};
pub use list::ListCarsQuery;
pub use models::ModelsByBrandQuery;
pub use search::SearchCarsQuery;

/// Errors shared by the catalog queries
#[derive(Debug, thiserror::Error)]
pub enum CarQueryError {
    #[error("Query parameter '{0}' is required")]
    MissingParameter(&'static str),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Unwrap a required query parameter; blank counts as missing.
pub(crate) fn required(value: Option<String>, name: &'static str) -> Result<String, CarQueryError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(CarQueryError::MissingParameter(name))
}
