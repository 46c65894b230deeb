//! Best-variant selection and the catalog summary view built on it
//!
//! A car model is listed with the price and power of one representative
//! variant: the cheapest, then the least powerful among equally cheap ones,
//! then whichever comes first in the stored order.

use serde::Serialize;

use crate::types::{CarDraft, Price, Variant};

fn price_key(variant: &Variant) -> f64 {
    variant
        .price
        .as_ref()
        .map(|p| p.amount)
        .unwrap_or(f64::INFINITY)
}

fn power_key(variant: &Variant) -> f64 {
    variant
        .specifications
        .power
        .as_ref()
        .and_then(|p| p.value.as_number())
        .unwrap_or(f64::INFINITY)
}

/// Pick the representative variant of a car.
///
/// Missing prices and powers rank as +infinity. A candidate replaces the
/// current best only on strict improvement, so ties keep the earlier entry.
/// Returns `None` only for an empty slice.
pub fn select_best_variant(variants: &[Variant]) -> Option<&Variant> {
    let (first, rest) = variants.split_first()?;

    let best = rest.iter().fold(first, |best, candidate| {
        let (candidate_price, best_price) = (price_key(candidate), price_key(best));
        let (candidate_power, best_power) = (power_key(candidate), power_key(best));

        if candidate_price < best_price
            || (candidate_price == best_price && candidate_power < best_power)
        {
            candidate
        } else {
            best
        }
    });

    Some(best)
}

/// Listing row for one car model
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub model_name: String,
    pub body_type: String,
    pub generation: Option<String>,
    pub power: Option<String>,
    pub price: Option<Price>,
    pub image: Option<String>,
}

/// Whether the summary carries the brand column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrandColumn {
    Include,
    Omit,
}

/// Build the summary row of a car from its best variant.
///
/// The image is the best variant's main image, falling back to the first
/// entry of the model gallery; empty strings do not count.
pub fn summarize(car: &CarDraft, brand: BrandColumn) -> CarSummary {
    let best = select_best_variant(&car.variants);

    let image = best
        .and_then(|v| v.images.as_ref())
        .map(|images| images.main_image.as_str())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            car.base_image_gallery
                .first()
                .map(String::as_str)
                .filter(|s| !s.is_empty())
        })
        .map(str::to_string);

    CarSummary {
        brand: match brand {
            BrandColumn::Include => Some(car.brand.clone()),
            BrandColumn::Omit => None,
        },
        model_name: car.model_name.clone(),
        body_type: car.body_type.clone(),
        generation: car.generation.clone(),
        power: best
            .and_then(|v| v.specifications.power.as_ref())
            .map(ToString::to_string),
        price: best.and_then(|v| v.price.clone()),
        image,
    }
}
