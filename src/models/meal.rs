use serde::{Deserialize, Serialize};

/// A logged meal with its ingredient lines, as returned by `GET /meals`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    pub id: String,
    #[serde(rename = "type")]
    pub meal_type: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<MealItem>,
}

/// One ingredient line of a meal. Field names follow the backend's French
/// column names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealItem {
    pub id: String,
    #[serde(rename = "nom_aliment")]
    pub name: String,
    #[serde(rename = "marque", default)]
    pub brand: Option<String>,
    #[serde(rename = "quantite")]
    pub quantity: f64,
    #[serde(rename = "unite")]
    pub unit: String,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(rename = "proteines_g", default)]
    pub proteins_g: Option<f64>,
    #[serde(rename = "glucides_g", default)]
    pub carbs_g: Option<f64>,
    #[serde(rename = "lipides_g", default)]
    pub fats_g: Option<f64>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// A new ingredient line for the `add` list of a meal patch. Name, quantity
/// and unit are mandatory; nutrition values are optional and recomputed
/// server-side when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealItemDraft {
    #[serde(rename = "nom_aliment")]
    pub name: String,
    #[serde(rename = "quantite")]
    pub quantity: f64,
    #[serde(rename = "unite")]
    pub unit: String,
    #[serde(rename = "marque", skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(rename = "proteines_g", skip_serializing_if = "Option::is_none")]
    pub proteins_g: Option<f64>,
    #[serde(rename = "glucides_g", skip_serializing_if = "Option::is_none")]
    pub carbs_g: Option<f64>,
    #[serde(rename = "lipides_g", skip_serializing_if = "Option::is_none")]
    pub fats_g: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl MealItemDraft {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        MealItemDraft {
            name: name.into(),
            quantity,
            unit: unit.into(),
            brand: None,
            calories: None,
            proteins_g: None,
            carbs_g: None,
            fats_g: None,
            barcode: None,
            source: None,
        }
    }
}

/// A changed ingredient line for the `update` list of a meal patch. Only the
/// id is required; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MealItemChange {
    pub id: String,
    #[serde(rename = "nom_aliment", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "quantite", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(rename = "unite", skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "marque", skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(rename = "proteines_g", skip_serializing_if = "Option::is_none")]
    pub proteins_g: Option<f64>,
    #[serde(rename = "glucides_g", skip_serializing_if = "Option::is_none")]
    pub carbs_g: Option<f64>,
    #[serde(rename = "lipides_g", skip_serializing_if = "Option::is_none")]
    pub fats_g: Option<f64>,
}

/// Body of `PATCH /meals/{id}`: line edits plus optional meal-level changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MealPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add: Option<Vec<MealItemDraft>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<Vec<MealItemChange>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Vec<String>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl MealPatch {
    pub fn is_empty(&self) -> bool {
        self.add.as_ref().map_or(true, Vec::is_empty)
            && self.update.as_ref().map_or(true, Vec::is_empty)
            && self.delete.as_ref().map_or(true, Vec::is_empty)
            && self.meal_type.is_none()
            && self.date.is_none()
    }
}

/// One analyzed food from a free-text ingredient query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyzedFood {
    #[serde(rename = "aliment")]
    pub name: String,
    #[serde(rename = "quantite")]
    pub quantity: String,
    #[serde(rename = "poids_g")]
    pub weight_g: f64,
    pub calories: f64,
    #[serde(rename = "proteines_g")]
    pub proteins_g: f64,
    #[serde(rename = "glucides_g")]
    pub carbs_g: f64,
    #[serde(rename = "lipides_g")]
    pub fats_g: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MacroTotals {
    pub total_calories: f64,
    pub total_proteins_g: f64,
    pub total_carbs_g: f64,
    pub total_fats_g: f64,
}

/// Response of `POST /ingredients`: per-food breakdown plus totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientAnalysis {
    pub foods: Vec<AnalyzedFood>,
    pub totals: MacroTotals,
}
