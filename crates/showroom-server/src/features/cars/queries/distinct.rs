//! Distinct brand and country listings

use serde::Deserialize;

use super::{required, CarQueryError};
use crate::db::{CarStore, DistinctField};

/// Every distinct value of a field
#[derive(Debug, Clone, Copy)]
pub struct DistinctValuesQuery {
    pub field: DistinctField,
}

/// Distinct values of a field containing `q`, ignoring case
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchValuesQuery {
    pub q: Option<String>,
}

#[tracing::instrument(skip(store))]
pub async fn handle(
    store: &dyn CarStore,
    query: DistinctValuesQuery,
) -> Result<Vec<String>, CarQueryError> {
    Ok(store.distinct_values(query.field, None).await?)
}

#[tracing::instrument(skip(store))]
pub async fn handle_search(
    store: &dyn CarStore,
    field: DistinctField,
    query: SearchValuesQuery,
) -> Result<Vec<String>, CarQueryError> {
    let needle = required(query.q, "q")?;
    Ok(store.distinct_values(field, Some(&needle)).await?)
}
