//! Car catalog API routes
//!
//! # Route Structure
//!
//! - `POST /cars` - Add a car model
//! - `GET /cars?modelName=` - Full documents, optionally filtered by model name
//! - `GET /cars/models?brand=` - Model summaries of one brand
//! - `GET /cars/by-country?originCountry=` - Summaries grouped by brand
//! - `GET /cars/all` - Every summary, sorted by brand and model
//! - `GET /cars/brands`, `GET /cars/countries` - Distinct values
//! - `GET /cars/search-brands?q=`, `GET /cars/search-countries?q=` - Filtered distinct values
//! - `GET /cars/search-car?q=` - Summaries matching brand or model

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

use super::{
    commands::{CreateCarCommand, CreateCarError},
    queries::{
        AllCarsQuery, CarQueryError, CarsByCountryQuery, DistinctValuesQuery, ListCarsQuery,
        ModelsByBrandQuery, SearchCarsQuery, SearchValuesQuery,
    },
};
use crate::{
    db::{CarStore, DistinctField},
    error::{AppError, AppResult},
};

type CarState = State<Arc<dyn CarStore>>;

impl From<CreateCarError> for AppError {
    fn from(err: CreateCarError) -> Self {
        match err {
            CreateCarError::Invalid(e) => AppError::from(e),
            CreateCarError::Store(e) => AppError::Store(e),
        }
    }
}

impl From<CarQueryError> for AppError {
    fn from(err: CarQueryError) -> Self {
        match err {
            CarQueryError::MissingParameter(_) => AppError::Validation(err.to_string()),
            CarQueryError::Store(e) => AppError::Store(e),
        }
    }
}

// ============================================================================
// Router Configuration
// ============================================================================

pub fn cars_routes() -> Router<Arc<dyn CarStore>> {
    Router::new()
        .route("/", get(list_cars).post(create_car))
        .route("/models", get(models_by_brand))
        .route("/by-country", get(cars_by_country))
        .route("/all", get(all_cars))
        .route("/brands", get(brands))
        .route("/countries", get(countries))
        .route("/search-brands", get(search_brands))
        .route("/search-countries", get(search_countries))
        .route("/search-car", get(search_cars))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// `POST /cars`
///
/// - `201 Created` - stored car with id and timestamps
/// - `400 Bad Request` - malformed JSON or validation failure
async fn create_car(
    State(store): CarState,
    body: Result<Json<CreateCarCommand>, JsonRejection>,
) -> AppResult<Response> {
    let Json(command) = body?;

    let car = super::commands::create::handle(store.as_ref(), command).await?;

    Ok((StatusCode::CREATED, Json(car)).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

async fn list_cars(
    State(store): CarState,
    query: Result<Query<ListCarsQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query?;
    let cars = super::queries::list::handle(store.as_ref(), query).await?;
    Ok(Json(cars).into_response())
}

async fn models_by_brand(
    State(store): CarState,
    query: Result<Query<ModelsByBrandQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query?;
    let models = super::queries::models::handle(store.as_ref(), query).await?;
    Ok(Json(models).into_response())
}

async fn cars_by_country(
    State(store): CarState,
    query: Result<Query<CarsByCountryQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query?;
    let grouped = super::queries::by_country::handle(store.as_ref(), query).await?;
    Ok(Json(grouped).into_response())
}

async fn all_cars(State(store): CarState) -> AppResult<Response> {
    let cars = super::queries::all::handle(store.as_ref(), AllCarsQuery).await?;
    Ok(Json(cars).into_response())
}

async fn brands(State(store): CarState) -> AppResult<Response> {
    let query = DistinctValuesQuery {
        field: DistinctField::Brand,
    };
    let brands = super::queries::distinct::handle(store.as_ref(), query).await?;
    Ok(Json(brands).into_response())
}

async fn countries(State(store): CarState) -> AppResult<Response> {
    let query = DistinctValuesQuery {
        field: DistinctField::OriginCountry,
    };
    let countries = super::queries::distinct::handle(store.as_ref(), query).await?;
    Ok(Json(countries).into_response())
}

async fn search_brands(
    State(store): CarState,
    query: Result<Query<SearchValuesQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query?;
    let brands =
        super::queries::distinct::handle_search(store.as_ref(), DistinctField::Brand, query).await?;
    Ok(Json(brands).into_response())
}

async fn search_countries(
    State(store): CarState,
    query: Result<Query<SearchValuesQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query?;
    let countries =
        super::queries::distinct::handle_search(store.as_ref(), DistinctField::OriginCountry, query)
            .await?;
    Ok(Json(countries).into_response())
}

async fn search_cars(
    State(store): CarState,
    query: Result<Query<SearchCarsQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query?;
    let cars = super::queries::search::handle(store.as_ref(), query).await?;
    Ok(Json(cars).into_response())
}
