use serde::{Deserialize, Serialize};

/// Qualifies how far a macro sits from its goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviationStatus {
    Good,
    Warning,
    Danger,
}

/// Deviation of one macronutrient against its goal. Positive percentage
/// means surplus, negative means deficit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroDeviation {
    pub value: f64,
    pub percentage: i64,
    pub status: DeviationStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceStatus {
    Deficit,
    Surplus,
    Balanced,
}

/// Calendar-cell completion indicator for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    NoData,
    Partial,
    Excellent,
}

/// Dashboard calories card. `display_percentage` caps the bar fill at 100
/// while `percentage` keeps the true figure for the label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaloriesProgress {
    pub consumed: i64,
    pub target: i64,
    pub percentage: i64,
    pub display_percentage: i64,
    pub status: DeviationStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetabolicContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tdee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_need: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroDeviations {
    pub calories: MacroDeviation,
    pub proteins: MacroDeviation,
    pub carbs: MacroDeviation,
    pub fats: MacroDeviation,
}

/// The enriched daily insight: balance, feedback, per-macro deviations and
/// metabolic context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyInsight {
    pub calorie_balance: f64,
    pub balance_status: BalanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_feedback: Option<String>,
    pub macro_deviations: MacroDeviations,
    pub metabolic_context: MetabolicContext,
}
