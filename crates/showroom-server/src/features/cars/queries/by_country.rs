//! Cars of one origin country, grouped by brand

use serde::Deserialize;
use showroom_common::selection::{summarize, BrandColumn, CarSummary};
use std::collections::BTreeMap;

use super::{required, CarQueryError};
use crate::db::{CarStore, LIST_LIMIT};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarsByCountryQuery {
    pub origin_country: Option<String>,
}

/// Brand name to the summaries of its cars, keys in lexicographic order
pub type CarsByCountryResponse = BTreeMap<String, Vec<CarSummary>>;

#[tracing::instrument(skip(store))]
pub async fn handle(
    store: &dyn CarStore,
    query: CarsByCountryQuery,
) -> Result<CarsByCountryResponse, CarQueryError> {
    let country = required(query.origin_country, "originCountry")?;

    let cars = store.cars_by_country(&country, LIST_LIMIT).await?;

    let mut grouped = CarsByCountryResponse::new();
    for car in &cars {
        grouped
            .entry(car.details.brand.clone())
            .or_default()
            .push(summarize(&car.details, BrandColumn::Omit));
    }

    tracing::debug!(brands = grouped.len(), cars = cars.len(), "Grouped cars by brand");

    Ok(grouped)
}
