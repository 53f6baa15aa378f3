use chrono::NaiveDate;
use serde::Serialize;

use crate::error::AppError;
use crate::models::activity::{Activity, ActivityUpdate, Intensity};
use crate::models::profile::UserProfile;
use crate::services::activity_service::ScaledEstimate;
use crate::store::ActivityPrefill;

use super::{AppState, CommandResult};

pub async fn activities_list(state: &AppState, date: NaiveDate) -> CommandResult<Vec<Activity>> {
    Ok(state.activities().activities(date).await?)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    pub activity: String,
    pub duration_min: f64,
    pub intensity: Intensity,
    pub calories: i64,
}

impl From<ScaledEstimate> for EstimateResult {
    fn from(estimate: ScaledEstimate) -> Self {
        EstimateResult {
            activity: estimate.activity,
            duration_min: estimate.duration_min,
            intensity: estimate.intensity,
            calories: estimate.calories,
        }
    }
}

/// Preview the calories an activity would burn, without logging it.
pub async fn activity_estimate(
    state: &AppState,
    activity: &str,
    duration_min: f64,
    intensity: Intensity,
) -> CommandResult<EstimateResult> {
    let profile = require_profile(state).await?;
    let estimate = state
        .activities()
        .estimate(activity, duration_min, intensity, &profile)
        .await?;
    Ok(estimate.into())
}

/// Log an activity; calories are estimated from the user's body profile and
/// scaled by intensity.
pub async fn activity_log(
    state: &AppState,
    activity: &str,
    duration_min: f64,
    intensity: Intensity,
) -> CommandResult<EstimateResult> {
    let profile = require_profile(state).await?;
    let estimate = state
        .activities()
        .log(activity, duration_min, intensity, &profile)
        .await?;
    Ok(estimate.into())
}

pub async fn activity_update(
    state: &AppState,
    activity_id: &str,
    update: &ActivityUpdate,
    date: NaiveDate,
) -> CommandResult<Activity> {
    Ok(state.activities().update(activity_id, update, date).await?)
}

pub async fn activity_delete(
    state: &AppState,
    activity_id: &str,
    date: NaiveDate,
) -> CommandResult<()> {
    Ok(state.activities().delete(activity_id, date).await?)
}

pub async fn sports_list(state: &AppState) -> CommandResult<Vec<String>> {
    Ok(state.activities().sports().await?)
}

/// Last-used duration/intensity for an activity name.
pub async fn activity_prefill(
    state: &AppState,
    activity: &str,
) -> CommandResult<Option<ActivityPrefill>> {
    Ok(state.activities().prefill_for(activity)?)
}

async fn require_profile(state: &AppState) -> CommandResult<UserProfile> {
    match state.profile().profile().await? {
        Some(profile) => Ok(profile),
        None => Err(AppError::validation(
            "Un profil utilisateur est requis pour estimer les calories brûlées",
        )
        .into()),
    }
}
