use serde::{Deserialize, Serialize};

/// Biological sex as the backend understands it. The API historically
/// accepted both English and French spellings; both deserialize into the
/// same canonical variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[serde(alias = "homme")]
    Male,
    #[serde(alias = "femme")]
    Female,
}

impl Sex {
    /// Wire value expected by the exercise-analysis endpoint (`male|female`).
    pub fn as_gender(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

/// Weight objective. Wire values are the legacy French ones; English
/// aliases are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Goal {
    #[serde(rename = "perte", alias = "loss")]
    Loss,
    #[serde(rename = "maintien", alias = "maintenance")]
    Maintenance,
    #[serde(rename = "prise", alias = "gain")]
    Gain,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(rename = "poids_kg")]
    pub weight_kg: f64,
    #[serde(rename = "taille_cm")]
    pub height_cm: f64,
    pub age: u32,
    #[serde(rename = "sexe")]
    pub sex: Sex,
    #[serde(default = "default_activity_factor")]
    pub activity_factor: f64,
    #[serde(default)]
    pub goal: Option<Goal>,
    /// TDEE before goal adjustment, as computed server-side.
    #[serde(default)]
    pub tdee_base: Option<f64>,
    /// Goal-adjusted TDEE, as computed server-side.
    #[serde(default)]
    pub tdee: Option<f64>,
}

fn default_activity_factor() -> f64 {
    1.2
}

/// Partial profile update; only populated fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileUpdate {
    #[serde(rename = "poids_kg", skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(rename = "taille_cm", skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(rename = "sexe", skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,
}

/// Macro split behind the computed targets, as percentages of calories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GoalRatios {
    pub prot_pct: f64,
    pub fat_pct: f64,
    pub carbs_pct: f64,
}

/// Personalized calorie and macro objectives from `GET /user/goals`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserGoals {
    pub target_kcal: f64,
    pub prot_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
    pub ratios: GoalRatios,
    pub tdee: f64,
    #[serde(rename = "objectif")]
    pub objective: String,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.weight_kg.is_none()
            && self.height_cm.is_none()
            && self.age.is_none()
            && self.sex.is_none()
            && self.activity_factor.is_none()
            && self.goal.is_none()
    }
}
