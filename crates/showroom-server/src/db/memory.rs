//! In-memory store used when no database is configured and in tests

use async_trait::async_trait;
use chrono::Utc;
use showroom_common::types::{Car, CarDraft, ConnectionRequest, NewConnectionRequest};
use std::collections::BTreeSet;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CarStore, ConnectionRequestStore, DistinctField, StoreResult};

#[derive(Default)]
pub struct MemoryStore {
    cars: RwLock<Vec<Car>>,
    requests: RwLock<Vec<ConnectionRequest>>,
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn capped(limit: i64) -> usize {
    usize::try_from(limit).unwrap_or(0)
}

impl MemoryStore {
    async fn filtered<F>(&self, limit: Option<i64>, predicate: F) -> Vec<Car>
    where
        F: Fn(&CarDraft) -> bool,
    {
        let cars = self.cars.read().await;
        let matching = cars.iter().filter(|car| predicate(&car.details)).cloned();
        match limit {
            Some(limit) => matching.take(capped(limit)).collect(),
            None => matching.collect(),
        }
    }
}

#[async_trait]
impl CarStore for MemoryStore {
    async fn insert_car(&self, draft: CarDraft) -> StoreResult<Car> {
        let now = Utc::now();
        let car = Car {
            id: Uuid::new_v4(),
            details: draft,
            created_at: now,
            updated_at: now,
        };
        self.cars.write().await.push(car.clone());
        Ok(car)
    }

    async fn list_cars(&self, model_name: Option<&str>, limit: i64) -> StoreResult<Vec<Car>> {
        Ok(self
            .filtered(Some(limit), |car| {
                model_name.is_none_or(|name| car.model_name == name)
            })
            .await)
    }

    async fn cars_by_brand(&self, brand: &str, limit: i64) -> StoreResult<Vec<Car>> {
        let brand = brand.to_lowercase();
        Ok(self
            .filtered(Some(limit), |car| car.brand.to_lowercase() == brand)
            .await)
    }

    async fn cars_by_country(&self, country: &str, limit: i64) -> StoreResult<Vec<Car>> {
        Ok(self
            .filtered(Some(limit), |car| car.origin_country.as_deref() == Some(country))
            .await)
    }

    async fn cars_sorted(&self) -> StoreResult<Vec<Car>> {
        let mut cars = self.filtered(None, |_| true).await;
        // Stable sort keeps insertion order among identical keys.
        cars.sort_by(|a, b| {
            (a.details.brand.as_str(), a.details.model_name.as_str())
                .cmp(&(b.details.brand.as_str(), b.details.model_name.as_str()))
        });
        Ok(cars)
    }

    async fn search_cars(&self, needle: &str, limit: i64) -> StoreResult<Vec<Car>> {
        let needle = needle.to_lowercase();
        Ok(self
            .filtered(Some(limit), |car| {
                contains_ignore_case(&car.brand, &needle)
                    || contains_ignore_case(&car.model_name, &needle)
            })
            .await)
    }

    async fn distinct_values(
        &self,
        field: DistinctField,
        contains: Option<&str>,
    ) -> StoreResult<Vec<String>> {
        let needle = contains.map(str::to_lowercase);
        let cars = self.cars.read().await;

        let values: BTreeSet<String> = cars
            .iter()
            .filter_map(|car| field.read(&car.details))
            .filter(|value| {
                needle
                    .as_deref()
                    .is_none_or(|needle| contains_ignore_case(value, needle))
            })
            .map(str::to_string)
            .collect();

        Ok(values.into_iter().collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[async_trait]
impl ConnectionRequestStore for MemoryStore {
    async fn insert_request(
        &self,
        request: NewConnectionRequest,
    ) -> StoreResult<ConnectionRequest> {
        let now = Utc::now();
        let stored = ConnectionRequest {
            id: Uuid::new_v4(),
            source: request.source,
            name: request.name,
            email: request.email,
            message: request.message,
            created_at: now,
            updated_at: now,
        };
        self.requests.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn get_request(&self, id: Uuid) -> StoreResult<Option<ConnectionRequest>> {
        Ok(self
            .requests
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn count_requests(&self) -> StoreResult<i64> {
        Ok(self.requests.read().await.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(brand: &str, model: &str, country: Option<&str>) -> CarDraft {
        serde_json::from_value(json!({
            "brand": brand,
            "modelName": model,
            "bodyType": "Hatchback",
            "originCountry": country,
            "variants": [{
                "variantId": "v1",
                "variantName": "Base",
                "price": { "amount": 500000 },
                "fuelType": "CNG",
                "transmission": "Manual"
            }]
        }))
        .unwrap()
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::default();
        for (brand, model, country) in [
            ("Maruti", "Swift", Some("India")),
            ("Hyundai", "i20", Some("South Korea")),
            ("maruti", "Alto", Some("India")),
            ("Audi", "A4", None),
        ] {
            store.insert_car(draft(brand, model, country)).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_sorted_is_byte_wise() {
        let store = seeded().await;
        let order: Vec<_> = store
            .cars_sorted()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.details.model_name)
            .collect();
        assert_eq!(order, vec!["A4", "i20", "Swift", "Alto"]);
    }

    #[tokio::test]
    async fn test_brand_match_ignores_case() {
        let store = seeded().await;
        assert_eq!(store.cars_by_brand("MARUTI", 50).await.unwrap().len(), 2);
        assert_eq!(store.cars_by_brand("Marut", 50).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_missing_filters_match_everything() {
        let store = seeded().await;
        assert_eq!(store.list_cars(None, 50).await.unwrap().len(), 4);
        assert_eq!(
            store.distinct_values(DistinctField::Brand, None).await.unwrap(),
            vec!["Audi", "Hyundai", "Maruti", "maruti"]
        );
    }

    #[tokio::test]
    async fn test_request_count_tracks_inserts() {
        let store = MemoryStore::default();
        assert_eq!(store.count_requests().await.unwrap(), 0);
        store
            .insert_request(NewConnectionRequest {
                source: "portfolio".into(),
                name: "Ada".into(),
                email: "ada@example.com".into(),
                message: "Hi".into(),
            })
            .await
            .unwrap();
        assert_eq!(store.count_requests().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_limit_is_applied() {
        let store = seeded().await;
        assert_eq!(store.list_cars(None, 2).await.unwrap().len(), 2);
        assert_eq!(store.list_cars(Some("Swift"), 50).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_distinct_values_skip_missing_and_filter() {
        let store = seeded().await;
        assert_eq!(
            store
                .distinct_values(DistinctField::OriginCountry, None)
                .await
                .unwrap(),
            vec!["India".to_string(), "South Korea".to_string()]
        );
        assert_eq!(
            store
                .distinct_values(DistinctField::Brand, Some("MAR"))
                .await
                .unwrap(),
            vec!["Maruti".to_string(), "maruti".to_string()]
        );
    }

    #[tokio::test]
    async fn test_search_matches_brand_or_model() {
        let store = seeded().await;
        assert_eq!(store.search_cars("i2", 50).await.unwrap().len(), 1);
        assert_eq!(store.search_cars("AR", 50).await.unwrap().len(), 2);
    }
}
