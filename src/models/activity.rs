use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A logged sporting activity, as returned by `GET /activities`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: String,
    pub description: String,
    #[serde(rename = "duree_min")]
    pub duration_min: f64,
    #[serde(rename = "calories_brulees")]
    pub calories_burned: f64,
    #[serde(rename = "intensite", default)]
    pub intensity: Option<Intensity>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Perceived effort level. The multiplier scales the MET-based calorie
/// estimate returned by the exercise analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Light,
    Moderate,
    Intense,
}

impl Intensity {
    pub fn multiplier(self) -> f64 {
        match self {
            Intensity::Light => 0.8,
            Intensity::Moderate => 1.0,
            Intensity::Intense => 1.3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Intensity::Light => "light",
            Intensity::Moderate => "moderate",
            Intensity::Intense => "intense",
        }
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Intensity::Moderate
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(Intensity::Light),
            "moderate" => Ok(Intensity::Moderate),
            "intense" => Ok(Intensity::Intense),
            other => Err(AppError::validation(format!(
                "Intensité inconnue: {other} (attendu: light, moderate ou intense)"
            ))),
        }
    }
}

/// Body of `PATCH /activities/{id}`; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ActivityUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "duree_min", skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<f64>,
    #[serde(rename = "calories_brulees", skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<f64>,
    #[serde(rename = "intensite", skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Intensity>,
}

/// One matched exercise from `POST /exercise`: MET-based estimate before any
/// intensity scaling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseEstimate {
    pub name: String,
    pub duration_min: f64,
    pub calories: f64,
    #[serde(default)]
    pub met: Option<f64>,
}
