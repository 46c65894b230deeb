//! Create car command
//!
//! The body is validated by [`CarPayload::into_draft`] before anything is
//! written, so a rejected car never reaches the store.

use serde::Deserialize;
use showroom_common::{
    types::{Car, CarPayload},
    ShowroomError,
};

use crate::db::{CarStore, StoreError};

/// Command to add a car model to the catalog
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct CreateCarCommand {
    pub car: CarPayload,
}

/// Errors that can occur when creating a car
#[derive(Debug, thiserror::Error)]
pub enum CreateCarError {
    #[error(transparent)]
    Invalid(#[from] ShowroomError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

#[tracing::instrument(
    skip(store, command),
    fields(brand = ?command.car.brand, model = ?command.car.model_name)
)]
pub async fn handle(
    store: &dyn CarStore,
    command: CreateCarCommand,
) -> Result<Car, CreateCarError> {
    let draft = command.car.into_draft()?;

    let car = store.insert_car(draft).await?;

    tracing::info!(
        car_id = %car.id,
        brand = %car.details.brand,
        model = %car.details.model_name,
        "Car created"
    );

    Ok(car)
}
