//! Domain types shared by the server and the seeder
//!
//! Field names follow the JSON documents the catalog front end exchanges
//! (`camelCase`), so the same structs serve as HTTP bodies, seed files, and
//! the JSONB documents kept by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;
use uuid::Uuid;

use crate::error::{Result, ShowroomError};

/// Currency applied when a price omits one
pub const DEFAULT_CURRENCY: &str = "INR";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Largest magnitude below which every whole `f64` is an exact integer (2^53)
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn whole(n: f64) -> Option<i64> {
    (n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER).then_some(n as i64)
}

/// Whole numbers go out as JSON integers (`18000`, not `18000.0`)
fn serialize_number<S>(n: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match whole(*n) {
        Some(i) => serializer.serialize_i64(i),
        None => serializer.serialize_f64(*n),
    }
}

// ============================================================================
// Variant Building Blocks
// ============================================================================

/// Price of a single variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    #[serde(serialize_with = "serialize_number")]
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Price {
    pub fn new(amount: f64) -> Self {
        Self {
            amount,
            currency: default_currency(),
        }
    }
}

/// A specification value, which the catalog stores either as a number or
/// as free text (e.g. `"1.2-1.5"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecScalar {
    #[serde(serialize_with = "serialize_number")]
    Number(f64),
    Text(String),
}

impl SpecScalar {
    /// Numeric reading of the value; text counts only when it parses as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SpecScalar::Number(n) => Some(*n),
            SpecScalar::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl std::fmt::Display for SpecScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecScalar::Number(n) => match whole(*n) {
                Some(i) => write!(f, "{i}"),
                None if n.is_finite() && n.fract() == 0.0 => write!(f, "{n:.0}"),
                None => write!(f, "{n}"),
            },
            SpecScalar::Text(s) => f.write_str(s),
        }
    }
}

/// Value + unit pair, optionally qualified (mileage "ARAI", "City", ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecValue {
    pub value: SpecScalar,
    pub unit: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl std::fmt::Display for SpecValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acceleration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zero_to_hundred_kmh: Option<SpecValue>,
}

/// Spec sheet of a variant. Every entry is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specifications {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_displacement: Option<SpecValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<SpecValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cylinders: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<SpecValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_speed: Option<SpecValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceleration: Option<Acceleration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kerb_weight: Option<SpecValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co2_emissions: Option<SpecValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuelType {
    Petrol,
    Diesel,
    #[serde(rename = "CNG")]
    Cng,
    Electric,
    #[serde(rename = "Plug-in Hybrid", alias = "Plug-in Hybrid (Electric + Petrol)")]
    PlugInHybrid,
    Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transmission {
    Manual,
    Automatic,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SafetyRating {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Images {
    pub main_image: String,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// A trim/configuration of a car model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub variant_id: String,
    pub variant_name: String,
    #[serde(default)]
    pub price: Option<Price>,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    #[serde(default)]
    pub specifications: Specifications,
    #[serde(default)]
    pub key_features: Vec<String>,
    #[serde(default)]
    pub available_colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_rating: Option<SafetyRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Images>,
}

impl Variant {
    fn validate(&self, index: usize) -> Result<()> {
        if self.variant_id.trim().is_empty() {
            return Err(ShowroomError::validation(format!(
                "variants[{index}].variantId is required"
            )));
        }
        if self.variant_name.trim().is_empty() {
            return Err(ShowroomError::validation(format!(
                "variants[{index}].variantName is required"
            )));
        }

        match &self.price {
            None => {
                return Err(ShowroomError::validation(format!(
                    "variants[{index}].price is required"
                )))
            },
            Some(price) if !price.amount.is_finite() || price.amount < 0.0 => {
                return Err(ShowroomError::validation(format!(
                    "variants[{index}].price.amount must be a non-negative number"
                )))
            },
            Some(price) if price.currency.trim().is_empty() => {
                return Err(ShowroomError::validation(format!(
                    "variants[{index}].price.currency cannot be empty"
                )))
            },
            Some(_) => {},
        }

        if let Some(stars) = self.safety_rating.as_ref().and_then(|r| r.stars) {
            if !(0.0..=5.0).contains(&stars) {
                return Err(ShowroomError::validation(format!(
                    "variants[{index}].safetyRating.stars must be between 0 and 5"
                )));
            }
        }

        if let Some(images) = &self.images {
            if images.main_image.trim().is_empty() {
                return Err(ShowroomError::validation(format!(
                    "variants[{index}].images.mainImage is required"
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Cars
// ============================================================================

/// Car document as submitted over HTTP or read from a seed file.
///
/// Required fields are optional here so that missing ones surface as a
/// validation failure naming them rather than a deserialisation error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarPayload {
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub generation: Option<String>,
    #[serde(default)]
    pub model_year_start: Option<i32>,
    #[serde(default)]
    pub origin_country: Option<String>,
    #[serde(default)]
    pub body_type: Option<String>,
    #[serde(default)]
    pub base_description: Option<String>,
    #[serde(default)]
    pub common_features: Vec<String>,
    #[serde(default)]
    pub base_image_gallery: Vec<String>,
    #[serde(default)]
    pub variants: Option<Vec<Variant>>,
}

impl CarPayload {
    /// Check required fields and variant integrity, producing a storable draft.
    ///
    /// # Errors
    ///
    /// - `Missing required fields: ...` listing blank brand/modelName/bodyType
    /// - `At least one variant is required`
    /// - a per-variant message such as `variants[1].price is required`
    pub fn into_draft(self) -> Result<CarDraft> {
        fn present(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|s| !s.trim().is_empty())
        }

        let missing: Vec<&str> = [
            ("brand", present(&self.brand)),
            ("modelName", present(&self.model_name)),
            ("bodyType", present(&self.body_type)),
        ]
        .into_iter()
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(ShowroomError::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let variants = match self.variants {
            Some(variants) if !variants.is_empty() => variants,
            _ => return Err(ShowroomError::validation("At least one variant is required")),
        };

        let mut seen = HashSet::new();
        for (index, variant) in variants.iter().enumerate() {
            variant.validate(index)?;
            if !seen.insert(variant.variant_id.as_str()) {
                return Err(ShowroomError::validation(format!(
                    "variants[{index}].variantId '{}' is duplicated",
                    variant.variant_id
                )));
            }
        }

        Ok(CarDraft {
            brand: self.brand.unwrap_or_default(),
            model_name: self.model_name.unwrap_or_default(),
            generation: self.generation,
            model_year_start: self.model_year_start,
            origin_country: self.origin_country,
            body_type: self.body_type.unwrap_or_default(),
            base_description: self.base_description,
            common_features: self.common_features,
            base_image_gallery: self.base_image_gallery,
            variants,
        })
    }
}

/// Validated car document, ready to be stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDraft {
    pub brand: String,
    pub model_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_year_start: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_country: Option<String>,
    pub body_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_description: Option<String>,
    #[serde(default)]
    pub common_features: Vec<String>,
    #[serde(default)]
    pub base_image_gallery: Vec<String>,
    pub variants: Vec<Variant>,
}

/// Stored car with its store-assigned identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: Uuid,
    #[serde(flatten)]
    pub details: CarDraft,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Contact Requests
// ============================================================================

/// Contact form body; every field must be present and non-blank
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ContactSubmission {
    pub fn into_request(self) -> Result<NewConnectionRequest> {
        fn take(value: Option<String>) -> Option<String> {
            value.filter(|s| !s.trim().is_empty())
        }

        match (
            take(self.source),
            take(self.name),
            take(self.email),
            take(self.message),
        ) {
            (Some(source), Some(name), Some(email), Some(message)) => Ok(NewConnectionRequest {
                source,
                name,
                email,
                message,
            }),
            _ => Err(ShowroomError::validation(
                "Missing required fields: source, name, email, message",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewConnectionRequest {
    pub source: String,
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Persisted contact request; never updated after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRequest {
    pub id: Uuid,
    pub source: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> CarPayload {
        serde_json::from_value(value).unwrap()
    }

    fn variant_json(id: &str) -> serde_json::Value {
        json!({
            "variantId": id,
            "variantName": format!("{id} trim"),
            "price": { "amount": 750000 },
            "fuelType": "Petrol",
            "transmission": "Manual"
        })
    }

    #[test]
    fn test_price_defaults_to_inr() {
        let price: Price = serde_json::from_value(json!({ "amount": 10.5 })).unwrap();
        assert_eq!(price.currency, "INR");
    }

    #[test]
    fn test_spec_scalar_accepts_number_or_text() {
        let power: SpecValue =
            serde_json::from_value(json!({ "value": 118, "unit": "bhp" })).unwrap();
        assert_eq!(power.value, SpecScalar::Number(118.0));
        assert_eq!(power.to_string(), "118 bhp");

        let mileage: SpecValue = serde_json::from_value(
            json!({ "value": "18-20", "unit": "kmpl", "type": "ARAI" }),
        )
        .unwrap();
        assert_eq!(mileage.value, SpecScalar::Text("18-20".into()));
        assert_eq!(mileage.kind.as_deref(), Some("ARAI"));
        assert_eq!(mileage.value.as_number(), None);
    }

    #[test]
    fn test_whole_amounts_serialize_as_integers() {
        let value = serde_json::to_value(Price::new(18000.0)).unwrap();
        assert_eq!(value.to_string(), r#"{"amount":18000,"currency":"INR"}"#);

        let value = serde_json::to_value(Price::new(10.5)).unwrap();
        assert_eq!(value["amount"], json!(10.5));

        let power = serde_json::to_string(&SpecScalar::Number(118.0)).unwrap();
        assert_eq!(power, "118");
    }

    #[test]
    fn test_large_whole_numbers_display_without_saturating() {
        assert_eq!(SpecScalar::Number(1e20).to_string(), "100000000000000000000");
        assert_eq!(SpecScalar::Number(-1e20).to_string(), "-100000000000000000000");
        assert_eq!(SpecScalar::Number(-0.0).to_string(), "0");
    }

    #[test]
    fn test_fractional_power_keeps_decimals() {
        let value = SpecScalar::Number(87.5);
        assert_eq!(value.to_string(), "87.5");
        assert_eq!(SpecScalar::Text(" 90 ".into()).as_number(), Some(90.0));
    }

    #[test]
    fn test_fuel_type_accepts_legacy_plug_in_label() {
        let legacy: FuelType =
            serde_json::from_value(json!("Plug-in Hybrid (Electric + Petrol)")).unwrap();
        assert_eq!(legacy, FuelType::PlugInHybrid);
        assert_eq!(serde_json::to_value(FuelType::Cng).unwrap(), json!("CNG"));
        assert!(serde_json::from_value::<FuelType>(json!("Steam")).is_err());
    }

    #[test]
    fn test_into_draft_lists_missing_fields() {
        let err = payload(json!({ "brand": "Tata", "variants": [variant_json("a")] }))
            .into_draft()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Missing required fields: modelName, bodyType"
        );
    }

    #[test]
    fn test_into_draft_treats_blank_as_missing() {
        let err = payload(json!({
            "brand": "  ",
            "modelName": "Nexon",
            "bodyType": "SUV",
            "variants": [variant_json("a")]
        }))
        .into_draft()
        .unwrap_err();
        assert!(err.to_string().contains("brand"));
    }

    #[test]
    fn test_into_draft_requires_variants() {
        for variants in [json!(null), json!([])] {
            let err = payload(json!({
                "brand": "Tata",
                "modelName": "Nexon",
                "bodyType": "SUV",
                "variants": variants
            }))
            .into_draft()
            .unwrap_err();
            assert!(err.to_string().contains("At least one variant is required"));
        }
    }

    #[test]
    fn test_into_draft_rejects_duplicate_variant_ids() {
        let err = payload(json!({
            "brand": "Tata",
            "modelName": "Nexon",
            "bodyType": "SUV",
            "variants": [variant_json("xz"), variant_json("xz")]
        }))
        .into_draft()
        .unwrap_err();
        assert!(err.to_string().contains("variants[1].variantId 'xz' is duplicated"));
    }

    #[test]
    fn test_into_draft_requires_variant_price() {
        let mut variant = variant_json("xz");
        variant.as_object_mut().unwrap().remove("price");
        let err = payload(json!({
            "brand": "Tata",
            "modelName": "Nexon",
            "bodyType": "SUV",
            "variants": [variant]
        }))
        .into_draft()
        .unwrap_err();
        assert!(err.to_string().contains("variants[0].price is required"));
    }

    #[test]
    fn test_into_draft_checks_star_rating_range() {
        let mut variant = variant_json("xz");
        variant["safetyRating"] = json!({ "agency": "GNCAP", "stars": 6 });
        let err = payload(json!({
            "brand": "Tata",
            "modelName": "Nexon",
            "bodyType": "SUV",
            "variants": [variant]
        }))
        .into_draft()
        .unwrap_err();
        assert!(err.to_string().contains("stars must be between 0 and 5"));
    }

    #[test]
    fn test_car_serializes_flat_camel_case() {
        let draft = payload(json!({
            "brand": "Tata",
            "modelName": "Nexon",
            "bodyType": "SUV",
            "originCountry": "India",
            "variants": [variant_json("xz")]
        }))
        .into_draft()
        .unwrap();

        let car = Car {
            id: Uuid::new_v4(),
            details: draft,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&car).unwrap();
        assert_eq!(value["brand"], "Tata");
        assert_eq!(value["modelName"], "Nexon");
        assert_eq!(value["originCountry"], "India");
        assert_eq!(value["variants"][0]["variantId"], "xz");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("details").is_none());
    }

    #[test]
    fn test_contact_submission_requires_all_fields() {
        let ok = ContactSubmission {
            source: Some("portfolio".into()),
            name: Some("Ada".into()),
            email: Some("ada@example.com".into()),
            message: Some("Hello".into()),
        };
        assert!(ok.into_request().is_ok());

        let blank_message = ContactSubmission {
            source: Some("portfolio".into()),
            name: Some("Ada".into()),
            email: Some("ada@example.com".into()),
            message: Some("   ".into()),
        };
        assert!(matches!(
            blank_message.into_request(),
            Err(ShowroomError::Validation(_))
        ));
    }
}
