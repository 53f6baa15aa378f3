use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Confidence the analyzer assigns to its averages, driven by how many of
/// the requested days actually carried data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

/// Aggregated nutrition figures over the analyzed window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyNutritionAnalysis {
    pub user_id: String,
    pub analysis_period: (NaiveDate, NaiveDate),
    pub days_with_data: u32,
    pub avg_calories: f64,
    pub avg_protein: f64,
    pub avg_carbs: f64,
    pub avg_fat: f64,
    pub avg_fiber: f64,
    pub avg_sodium: f64,
    pub avg_sugar: f64,
    #[serde(default)]
    pub deficiencies: Vec<String>,
    #[serde(default)]
    pub excesses: Vec<String>,
    pub overall_score: f64,
    pub confidence_level: ConfidenceLevel,
}

/// One concrete food proposed to correct a deficit or excess.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodSuggestion {
    pub name: String,
    pub nutrient_value: f64,
    pub nutrient_unit: String,
    pub portion: String,
    pub portion_size: f64,
    pub source: String,
    #[serde(default)]
    pub calories_per_portion: Option<f64>,
    #[serde(default)]
    pub additional_nutrients: HashMap<String, f64>,
}

/// One prioritized recommendation with its food suggestions. Categories are
/// `deficit_*` / `excess_*` strings from the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionRecommendation {
    pub id: String,
    pub category: String,
    pub priority: u8,
    pub message: String,
    pub explanation: String,
    #[serde(default)]
    pub food_suggestions: Vec<FoodSuggestion>,
    #[serde(default)]
    pub target_value: Option<f64>,
    #[serde(default)]
    pub current_value: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Response of `GET /nutrition-recommendations`: the weekly analysis plus
/// up to four recommendations and the mandatory disclaimer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionRecommendations {
    pub user_id: String,
    pub analysis: WeeklyNutritionAnalysis,
    #[serde(default)]
    pub recommendations: Vec<NutritionRecommendation>,
    pub generated_at: NaiveDate,
    pub disclaimer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_period_reads_as_a_date_pair() {
        let analysis: WeeklyNutritionAnalysis = serde_json::from_str(
            r#"{
                "user_id": "test-user",
                "analysis_period": ["2026-08-23", "2026-08-29"],
                "days_with_data": 5,
                "avg_calories": 1850.0,
                "avg_protein": 92.0,
                "avg_carbs": 210.0,
                "avg_fat": 61.0,
                "avg_fiber": 18.5,
                "avg_sodium": 2400.0,
                "avg_sugar": 48.0,
                "deficiencies": ["fiber"],
                "excesses": ["sodium"],
                "overall_score": 72.0,
                "confidence_level": "medium"
            }"#,
        )
        .expect("analysis");

        assert_eq!(
            analysis.analysis_period.0,
            "2026-08-23".parse::<NaiveDate>().expect("date")
        );
        assert_eq!(analysis.confidence_level, ConfidenceLevel::Medium);
        assert_eq!(analysis.deficiencies, vec!["fiber".to_string()]);
    }

    #[test]
    fn recommendation_tolerates_missing_optional_fields() {
        let rec: NutritionRecommendation = serde_json::from_str(
            r#"{
                "id": "rec-1",
                "category": "deficit_fiber",
                "priority": 1,
                "message": "Augmentez votre apport en fibres",
                "explanation": "Votre moyenne est de 18.5 g contre 30 g recommandés"
            }"#,
        )
        .expect("recommendation");

        assert!(rec.food_suggestions.is_empty());
        assert_eq!(rec.target_value, None);
        assert_eq!(rec.unit, None);
    }
}
