//! List cars query

use serde::Deserialize;
use showroom_common::types::Car;

use super::CarQueryError;
use crate::db::{CarStore, LIST_LIMIT};

/// Full car documents, optionally restricted to one model name
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCarsQuery {
    pub model_name: Option<String>,
}

#[tracing::instrument(skip(store))]
pub async fn handle(store: &dyn CarStore, query: ListCarsQuery) -> Result<Vec<Car>, CarQueryError> {
    let model_name = query.model_name.as_deref().filter(|m| !m.is_empty());
    Ok(store.list_cars(model_name, LIST_LIMIT).await?)
}
