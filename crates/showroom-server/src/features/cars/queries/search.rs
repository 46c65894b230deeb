//! Free-text car search

use serde::Deserialize;
use showroom_common::selection::{summarize, BrandColumn, CarSummary};

use super::{required, CarQueryError};
use crate::db::{CarStore, LIST_LIMIT};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchCarsQuery {
    pub q: Option<String>,
}

/// Summaries of cars whose brand or model name contains `q`, ignoring case.
/// The needle is matched literally.
#[tracing::instrument(skip(store))]
pub async fn handle(
    store: &dyn CarStore,
    query: SearchCarsQuery,
) -> Result<Vec<CarSummary>, CarQueryError> {
    let needle = required(query.q, "q")?;

    let cars = store.search_cars(&needle, LIST_LIMIT).await?;

    Ok(cars
        .iter()
        .map(|car| summarize(&car.details, BrandColumn::Include))
        .collect())
}
