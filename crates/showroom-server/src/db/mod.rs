//! Persistence layer
//!
//! The catalog talks to the store through two traits, [`CarStore`] and
//! [`ConnectionRequestStore`]. [`Store`] is the owned handle built at startup
//! and closed at shutdown; it is backed by PostgreSQL ([`postgres::PgStore`])
//! or, when no database is configured, by [`memory::MemoryStore`].

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use showroom_common::types::{Car, CarDraft, ConnectionRequest, NewConnectionRequest};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use uuid::Uuid;

use crate::config::DatabaseConfig;

/// Upper bound on rows returned by the capped catalog queries
pub const LIST_LIMIT: i64 = 50;

/// Store operation errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQL query or connection error
    #[error("Database query failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Car fields with a distinct-value listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistinctField {
    Brand,
    OriginCountry,
}

impl DistinctField {
    pub fn read<'a>(&self, car: &'a CarDraft) -> Option<&'a str> {
        match self {
            DistinctField::Brand => Some(car.brand.as_str()),
            DistinctField::OriginCountry => car.origin_country.as_deref(),
        }
    }
}

#[async_trait]
pub trait CarStore: Send + Sync {
    /// Persist a validated car, assigning its id and timestamps
    async fn insert_car(&self, draft: CarDraft) -> StoreResult<Car>;

    /// Cars in insertion order, optionally restricted to an exact model name
    async fn list_cars(&self, model_name: Option<&str>, limit: i64) -> StoreResult<Vec<Car>>;

    /// Cars whose brand equals `brand` ignoring case
    async fn cars_by_brand(&self, brand: &str, limit: i64) -> StoreResult<Vec<Car>>;

    /// Cars with exactly this origin country
    async fn cars_by_country(&self, country: &str, limit: i64) -> StoreResult<Vec<Car>>;

    /// Every car ordered by brand, then model name (byte-wise, case-sensitive)
    async fn cars_sorted(&self) -> StoreResult<Vec<Car>>;

    /// Cars whose brand or model name contains `needle` ignoring case
    async fn search_cars(&self, needle: &str, limit: i64) -> StoreResult<Vec<Car>>;

    /// Sorted distinct non-null values of `field`, optionally filtered by a
    /// case-insensitive substring
    async fn distinct_values(
        &self,
        field: DistinctField,
        contains: Option<&str>,
    ) -> StoreResult<Vec<String>>;

    /// Liveness check that also confirms the catalog table is readable
    async fn ping(&self) -> StoreResult<()>;
}

#[async_trait]
pub trait ConnectionRequestStore: Send + Sync {
    async fn insert_request(&self, request: NewConnectionRequest)
        -> StoreResult<ConnectionRequest>;

    async fn get_request(&self, id: Uuid) -> StoreResult<Option<ConnectionRequest>>;

    /// Number of stored requests
    async fn count_requests(&self) -> StoreResult<i64>;
}

/// Escape `%`, `_` and `\` so user input matches literally inside LIKE
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Connect to PostgreSQL and apply pending migrations
pub async fn connect_postgres(config: &DatabaseConfig, url: &str) -> StoreResult<PgPool> {
    let pool = pool_options(config).connect(url).await?;
    migrate(&pool).await?;
    Ok(pool)
}

/// Apply the embedded migrations that have not run yet
pub async fn migrate(pool: &PgPool) -> StoreResult<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
}

/// Owned store handle shared by the request handlers
#[derive(Clone)]
pub struct Store {
    pub cars: Arc<dyn CarStore>,
    pub requests: Arc<dyn ConnectionRequestStore>,
    pool: Option<PgPool>,
}

impl Store {
    /// Store over an already migrated pool
    pub fn postgres(pool: PgPool) -> Self {
        Self::from_pg(postgres::PgStore::new(pool.clone()), pool)
    }

    /// Store over a pool that has not reached the database yet; migrations
    /// run before its first query
    pub fn postgres_pending(pool: PgPool) -> Self {
        Self::from_pg(postgres::PgStore::pending(pool.clone()), pool)
    }

    fn from_pg(store: postgres::PgStore, pool: PgPool) -> Self {
        let store = Arc::new(store);
        Self {
            cars: store.clone(),
            requests: store,
            pool: Some(pool),
        }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(memory::MemoryStore::default());
        Self {
            cars: store.clone(),
            requests: store,
            pool: None,
        }
    }

    /// Open the store described by `config`.
    ///
    /// A failed initial connection does not stop the server: it is logged and
    /// a lazily connecting pool is used, so requests fail until the database
    /// becomes reachable. Migrations then run before the first query.
    pub async fn open(config: &DatabaseConfig) -> StoreResult<Self> {
        let Some(url) = config.url.as_deref() else {
            tracing::warn!("No database configured, using the in-memory store");
            return Ok(Self::in_memory());
        };

        match connect_postgres(config, url).await {
            Ok(pool) => {
                tracing::info!("Database connection pool established");
                Ok(Self::postgres(pool))
            },
            Err(StoreError::Sqlx(e)) => {
                tracing::error!(
                    error = %e,
                    "Initial database connection failed, continuing with a lazy pool"
                );
                let pool = pool_options(config).connect_lazy(url)?;
                Ok(Self::postgres_pending(pool))
            },
            Err(e) => Err(e),
        }
    }

    pub fn backend(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }

    /// Close the underlying connection pool, if any
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            tracing::info!("Database connection pool closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("100%_a\\b"), "100\\%\\_a\\\\b");
        assert_eq!(escape_like("Mahindra"), "Mahindra");
    }

    #[tokio::test]
    async fn test_open_without_url_is_in_memory() {
        let config = DatabaseConfig {
            url: None,
            max_connections: 1,
            connect_timeout_secs: 1,
        };
        let store = Store::open(&config).await.unwrap();
        assert_eq!(store.backend(), "memory");
        assert!(store.cars.ping().await.is_ok());
        store.close().await;
    }

    #[tokio::test]
    async fn test_open_with_unreachable_database_falls_back_to_lazy_pool() {
        let config = DatabaseConfig {
            url: Some("postgres://showroom@127.0.0.1:1/showroom".to_string()),
            max_connections: 1,
            connect_timeout_secs: 1,
        };
        let store = Store::open(&config).await.unwrap();
        assert_eq!(store.backend(), "postgres");
        assert!(store.cars.ping().await.is_err());
        assert!(store.requests.count_requests().await.is_err());
        store.close().await;
    }
}
