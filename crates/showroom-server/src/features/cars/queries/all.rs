//! Whole catalog, sorted

use showroom_common::selection::{summarize, BrandColumn, CarSummary};

use super::CarQueryError;
use crate::db::CarStore;

/// Every car as a summary, ordered by brand then model name
#[derive(Debug, Clone, Copy, Default)]
pub struct AllCarsQuery;

#[tracing::instrument(skip(store))]
pub async fn handle(
    store: &dyn CarStore,
    _query: AllCarsQuery,
) -> Result<Vec<CarSummary>, CarQueryError> {
    let cars = store.cars_sorted().await?;

    Ok(cars
        .iter()
        .map(|car| summarize(&car.details, BrandColumn::Include))
        .collect())
}
