//! Models of one brand

use serde::Deserialize;
use showroom_common::selection::{summarize, BrandColumn, CarSummary};

use super::{required, CarQueryError};
use crate::db::{CarStore, LIST_LIMIT};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelsByBrandQuery {
    pub brand: Option<String>,
}

/// Summaries (without brand) of the cars whose brand matches ignoring case
#[tracing::instrument(skip(store))]
pub async fn handle(
    store: &dyn CarStore,
    query: ModelsByBrandQuery,
) -> Result<Vec<CarSummary>, CarQueryError> {
    let brand = required(query.brand, "brand")?;

    let cars = store.cars_by_brand(&brand, LIST_LIMIT).await?;

    Ok(cars
        .iter()
        .map(|car| summarize(&car.details, BrandColumn::Omit))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::cars::queries::fixtures;

    #[tokio::test]
    async fn test_summaries_pick_cheapest_then_least_powerful() {
        let store = fixtures::catalog().await;

        let models = handle(
            &store,
            ModelsByBrandQuery {
                brand: Some("hONDA".into()),
            },
        )
        .await
        .unwrap();

        assert_eq!(models.len(), 2);
        assert!(models.iter().all(|m| m.brand.is_none()));

        let amaze = models.iter().find(|m| m.model_name == "Amaze").unwrap();
        assert_eq!(amaze.power.as_deref(), Some("88.5 bhp"));
        assert_eq!(amaze.image.as_deref(), Some("/images/Amaze-s.jpg"));

        let city = models.iter().find(|m| m.model_name == "City").unwrap();
        assert_eq!(city.power.as_deref(), Some("119 bhp"));
        assert_eq!(city.price.as_ref().map(|p| p.amount), Some(1_200_000.0));
    }

    #[tokio::test]
    async fn test_brand_is_required() {
        let store = fixtures::catalog().await;
        let err = handle(&store, ModelsByBrandQuery::default()).await.unwrap_err();
        assert!(matches!(err, CarQueryError::MissingParameter("brand")));
    }
}
