//! PostgreSQL-backed store
//!
//! Each car is one row: the full document lives in a JSONB column and the
//! fields used for filtering and sorting are mirrored into plain columns.
//!
//! A store built over a pool that never connected at startup holds its
//! migrations back and applies them before the first query that reaches the
//! database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use showroom_common::types::{Car, CarDraft, ConnectionRequest, NewConnectionRequest};
use sqlx::{types::Json, PgPool};
use std::sync::Arc;
use tokio::sync::OnceCell;
use uuid::Uuid;

use super::{
    escape_like, migrate, CarStore, ConnectionRequestStore, DistinctField, StoreError, StoreResult,
};

const CAR_COLUMNS: &str = "id, document, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    schema: Arc<OnceCell<()>>,
}

impl PgStore {
    /// Store over a pool whose migrations have already been applied
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema: Arc::new(OnceCell::new_with(Some(()))),
        }
    }

    /// Store that applies pending migrations on first use
    pub fn pending(pool: PgPool) -> Self {
        Self {
            pool,
            schema: Arc::new(OnceCell::new()),
        }
    }

    /// The pool, once the schema is in place. A failed migration is retried
    /// by the next call.
    async fn ready(&self) -> StoreResult<&PgPool> {
        self.schema
            .get_or_try_init(|| async {
                migrate(&self.pool).await?;
                tracing::info!("Deferred database migrations applied");
                Ok::<_, StoreError>(())
            })
            .await?;
        Ok(&self.pool)
    }

    async fn fetch_cars(
        &self,
        sql: &str,
        binds: &[&str],
        limit: Option<i64>,
    ) -> StoreResult<Vec<Car>> {
        let mut query = sqlx::query_as::<_, CarRow>(sql);
        for bind in binds {
            query = query.bind(*bind);
        }
        if let Some(limit) = limit {
            query = query.bind(limit);
        }

        let rows = query.fetch_all(self.ready().await?).await?;
        Ok(rows.into_iter().map(Car::from).collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CarRow {
    id: Uuid,
    document: Json<CarDraft>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CarRow> for Car {
    fn from(row: CarRow) -> Self {
        Car {
            id: row.id,
            details: row.document.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ConnectionRequestRow {
    id: Uuid,
    source: String,
    name: String,
    email: String,
    message: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ConnectionRequestRow> for ConnectionRequest {
    fn from(row: ConnectionRequestRow) -> Self {
        ConnectionRequest {
            id: row.id,
            source: row.source,
            name: row.name,
            email: row.email,
            message: row.message,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CarStore for PgStore {
    #[tracing::instrument(
        skip(self, draft),
        fields(brand = %draft.brand, model = %draft.model_name)
    )]
    async fn insert_car(&self, draft: CarDraft) -> StoreResult<Car> {
        let row = sqlx::query_as::<_, CarRow>(&format!(
            r#"
            INSERT INTO cars (id, brand, model_name, body_type, origin_country, document)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CAR_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&draft.brand)
        .bind(&draft.model_name)
        .bind(&draft.body_type)
        .bind(&draft.origin_country)
        .bind(Json(&draft))
        .fetch_one(self.ready().await?)
        .await?;

        Ok(row.into())
    }

    async fn list_cars(&self, model_name: Option<&str>, limit: i64) -> StoreResult<Vec<Car>> {
        let rows = sqlx::query_as::<_, CarRow>(&format!(
            r#"
            SELECT {CAR_COLUMNS}
            FROM cars
            WHERE ($1::TEXT IS NULL OR model_name = $1)
            ORDER BY created_at, id
            LIMIT $2
            "#
        ))
        .bind(model_name)
        .bind(limit)
        .fetch_all(self.ready().await?)
        .await?;

        Ok(rows.into_iter().map(Car::from).collect())
    }

    async fn cars_by_brand(&self, brand: &str, limit: i64) -> StoreResult<Vec<Car>> {
        self.fetch_cars(
            &format!(
                "SELECT {CAR_COLUMNS} FROM cars WHERE LOWER(brand) = LOWER($1) \
                 ORDER BY created_at, id LIMIT $2"
            ),
            &[brand],
            Some(limit),
        )
        .await
    }

    async fn cars_by_country(&self, country: &str, limit: i64) -> StoreResult<Vec<Car>> {
        self.fetch_cars(
            &format!(
                "SELECT {CAR_COLUMNS} FROM cars WHERE origin_country = $1 \
                 ORDER BY created_at, id LIMIT $2"
            ),
            &[country],
            Some(limit),
        )
        .await
    }

    async fn cars_sorted(&self) -> StoreResult<Vec<Car>> {
        self.fetch_cars(
            &format!(
                r#"SELECT {CAR_COLUMNS} FROM cars
                   ORDER BY brand COLLATE "C", model_name COLLATE "C""#
            ),
            &[],
            None,
        )
        .await
    }

    async fn search_cars(&self, needle: &str, limit: i64) -> StoreResult<Vec<Car>> {
        let pattern = format!("%{}%", escape_like(needle));
        self.fetch_cars(
            &format!(
                r#"
                SELECT {CAR_COLUMNS}
                FROM cars
                WHERE brand ILIKE $1 ESCAPE '\' OR model_name ILIKE $1 ESCAPE '\'
                ORDER BY created_at, id
                LIMIT $2
                "#
            ),
            &[pattern.as_str()],
            Some(limit),
        )
        .await
    }

    async fn distinct_values(
        &self,
        field: DistinctField,
        contains: Option<&str>,
    ) -> StoreResult<Vec<String>> {
        let column = match field {
            DistinctField::Brand => "brand",
            DistinctField::OriginCountry => "origin_country",
        };
        let pattern = contains.map(|needle| format!("%{}%", escape_like(needle)));

        let mut values = sqlx::query_scalar::<_, String>(&format!(
            r#"
            SELECT DISTINCT {column}
            FROM cars
            WHERE {column} IS NOT NULL
              AND ($1::TEXT IS NULL OR {column} ILIKE $1 ESCAPE '\')
            "#
        ))
        .bind(pattern)
        .fetch_all(self.ready().await?)
        .await?;

        values.sort();
        Ok(values)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1 FROM cars LIMIT 1")
            .execute(self.ready().await?)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ConnectionRequestStore for PgStore {
    #[tracing::instrument(skip(self, request), fields(source = %request.source))]
    async fn insert_request(
        &self,
        request: NewConnectionRequest,
    ) -> StoreResult<ConnectionRequest> {
        let row = sqlx::query_as::<_, ConnectionRequestRow>(
            r#"
            INSERT INTO connection_requests (id, source, name, email, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, source, name, email, message, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.source)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.message)
        .fetch_one(self.ready().await?)
        .await?;

        Ok(row.into())
    }

    async fn get_request(&self, id: Uuid) -> StoreResult<Option<ConnectionRequest>> {
        let row = sqlx::query_as::<_, ConnectionRequestRow>(
            r#"
            SELECT id, source, name, email, message, created_at, updated_at
            FROM connection_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.ready().await?)
        .await?;

        Ok(row.map(ConnectionRequest::from))
    }

    async fn count_requests(&self) -> StoreResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM connection_requests")
            .fetch_one(self.ready().await?)
            .await?;
        Ok(count)
    }
}
