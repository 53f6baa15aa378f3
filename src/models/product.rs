use serde::{Deserialize, Serialize};

/// Compact product card returned by `POST /barcode`, carrying the per-100g
/// facts. Scaling to the logged quantity happens in [`ProductSummary::scaled`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSummary {
    pub barcode: String,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub energy_kcal_per_100g: Option<f64>,
    #[serde(default)]
    pub proteins_per_100g: Option<f64>,
    #[serde(default)]
    pub carbs_per_100g: Option<f64>,
    #[serde(default)]
    pub fat_per_100g: Option<f64>,
    #[serde(default)]
    pub nutriscore: Option<String>,
}

/// Enriched OpenFoodFacts record from `GET /products/{barcode}/details`.
/// Score fields are surfaced verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDetails {
    pub barcode: String,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub serving_size: Option<String>,
    #[serde(default)]
    pub packaging: Option<String>,
    #[serde(default)]
    pub manufacturing_places: Option<String>,
    #[serde(default)]
    pub countries: Option<String>,
    #[serde(default)]
    pub energy_kcal_per_100g: Option<f64>,
    #[serde(default)]
    pub proteins_per_100g: Option<f64>,
    #[serde(default)]
    pub carbs_per_100g: Option<f64>,
    #[serde(default)]
    pub fat_per_100g: Option<f64>,
    #[serde(default)]
    pub sugars_per_100g: Option<f64>,
    #[serde(default)]
    pub salt_per_100g: Option<f64>,
    #[serde(default)]
    pub nutriscore_grade: Option<String>,
    #[serde(default)]
    pub ecoscore_grade: Option<String>,
    #[serde(default)]
    pub nova_group: Option<u8>,
    #[serde(default)]
    pub labels_tags: Option<String>,
    #[serde(default)]
    pub additives_tags: Option<String>,
    #[serde(default)]
    pub allergens_tags: Option<String>,
    #[serde(default)]
    pub traces_tags: Option<String>,
    #[serde(default)]
    pub ingredients_text: Option<String>,
}

/// Nutrition facts scaled from per-100g values to a concrete quantity.
/// Calories are rounded to the unit, macros to one decimal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScaledNutrition {
    pub quantity_g: f64,
    pub calories: i64,
    pub proteins_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl ProductSummary {
    /// Per-quantity nutrition facts. Missing per-100g values count as 0.
    pub fn scaled(&self, quantity_g: f64) -> ScaledNutrition {
        let multiplier = quantity_g / 100.0;
        ScaledNutrition {
            quantity_g,
            calories: (self.energy_kcal_per_100g.unwrap_or(0.0) * multiplier).round() as i64,
            proteins_g: round1(self.proteins_per_100g.unwrap_or(0.0) * multiplier),
            carbs_g: round1(self.carbs_per_100g.unwrap_or(0.0) * multiplier),
            fats_g: round1(self.fat_per_100g.unwrap_or(0.0) * multiplier),
        }
    }
}
