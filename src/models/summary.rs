use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the backend's `daily_summary` table, as served by
/// `GET /daily-summary`. The API grew three overlapping naming schemes over
/// time (`*_consumed`, `*_goal`, `target_*`) and older rows may omit any
/// field, so everything is optional and aliased.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DailySummary {
    #[serde(default, alias = "calories_apportees")]
    pub calories_consumed: Option<f64>,
    #[serde(default)]
    pub proteins_consumed: Option<f64>,
    #[serde(default)]
    pub carbs_consumed: Option<f64>,
    #[serde(default)]
    pub fats_consumed: Option<f64>,

    #[serde(default)]
    pub calories_goal: Option<f64>,
    #[serde(default)]
    pub proteins_goal: Option<f64>,
    #[serde(default)]
    pub carbs_goal: Option<f64>,
    #[serde(default)]
    pub fats_goal: Option<f64>,

    #[serde(default)]
    pub target_calories: Option<f64>,
    #[serde(default)]
    pub target_proteins_g: Option<f64>,
    #[serde(default)]
    pub target_carbs_g: Option<f64>,
    #[serde(default)]
    pub target_fats_g: Option<f64>,

    #[serde(default, alias = "calories_brulees")]
    pub calories_burned: Option<f64>,
    #[serde(default)]
    pub bmr: Option<f64>,
    #[serde(default)]
    pub tdee: Option<f64>,
    #[serde(default)]
    pub calorie_balance: Option<f64>,

    #[serde(default)]
    pub calories_total: Option<f64>,
    #[serde(default)]
    pub sport_total: Option<f64>,

    #[serde(default)]
    pub num_meals: Option<u32>,
    #[serde(default)]
    pub num_activities: Option<u32>,
    #[serde(default)]
    pub has_data: Option<bool>,

    #[serde(default)]
    pub goal_feedback: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Zero-defaulted canonical targets, for callers that want plain numbers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct NutritionTargets {
    pub calories: f64,
    pub proteins_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
}

impl DailySummary {
    /// Canonical target lookup, `Option` form. Per field the `target_*`
    /// column wins, then the legacy `*_goal` column. Callers that must
    /// distinguish "no goal configured" from an explicit 0 use these.
    pub fn calories_target(&self) -> Option<f64> {
        self.target_calories.or(self.calories_goal)
    }

    pub fn proteins_target(&self) -> Option<f64> {
        self.target_proteins_g.or(self.proteins_goal)
    }

    pub fn carbs_target(&self) -> Option<f64> {
        self.target_carbs_g.or(self.carbs_goal)
    }

    pub fn fats_target(&self) -> Option<f64> {
        self.target_fats_g.or(self.fats_goal)
    }

    /// Canonical targets with missing fields resolved to 0.
    pub fn targets(&self) -> NutritionTargets {
        NutritionTargets {
            calories: self.calories_target().unwrap_or(0.0),
            proteins_g: self.proteins_target().unwrap_or(0.0),
            carbs_g: self.carbs_target().unwrap_or(0.0),
            fats_g: self.fats_target().unwrap_or(0.0),
        }
    }

    /// Writes the resolved target of every macro back into both naming
    /// schemes, so downstream readers agree no matter which column they
    /// look at. Idempotent.
    pub fn canonicalized(mut self) -> Self {
        let calories = self.calories_target();
        let proteins = self.proteins_target();
        let carbs = self.carbs_target();
        let fats = self.fats_target();

        self.target_calories = calories;
        self.calories_goal = calories;
        self.target_proteins_g = proteins;
        self.proteins_goal = proteins;
        self.target_carbs_g = carbs;
        self.carbs_goal = carbs;
        self.target_fats_g = fats;
        self.fats_goal = fats;

        self
    }
}

/// One row of `GET /history`: the per-day calorie balance ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyBalance {
    pub date: NaiveDate,
    #[serde(default, alias = "calories_apportees")]
    pub calories_consumed: Option<f64>,
    #[serde(default, alias = "calories_brulees")]
    pub calories_burned: Option<f64>,
    #[serde(default)]
    pub tdee: Option<f64>,
    #[serde(default)]
    pub calorie_balance: Option<f64>,
    #[serde(default)]
    pub goal_feedback: Option<String>,
}
