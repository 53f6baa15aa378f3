use chrono::NaiveDate;
use serde::Serialize;

use crate::models::insight::CaloriesProgress;
use crate::models::profile::UserProfile;
use crate::models::summary::DailySummary;
use crate::services::insight_service;

use super::{AppState, CommandResult};

/// Everything the dashboard shows for one day.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub profile: Option<UserProfile>,
    pub summary: DailySummary,
    pub target_calories: f64,
    pub remaining_calories: f64,
    pub calories_progress: CaloriesProgress,
}

/// Profile and summary are fetched concurrently. The dashboard's remaining
/// figure is the simple `target − consumed`, with the target falling back
/// to the summary's TDEE when no target row exists; the insight view's
/// burn-aware remaining lives in the summary commands.
pub async fn dashboard_overview(state: &AppState, date: NaiveDate) -> CommandResult<DashboardData> {
    let profile_service = state.profile();
    let summary_service = state.summaries();

    let (profile, summary) = tokio::try_join!(
        profile_service.profile(),
        summary_service.summary(date),
    )?;

    let target = summary
        .target_calories
        .or(summary.tdee)
        .unwrap_or(0.0);
    let remaining = target - summary.calories_consumed.unwrap_or(0.0);

    Ok(DashboardData {
        profile,
        calories_progress: insight_service::calories_progress(&summary),
        target_calories: target,
        remaining_calories: remaining,
        summary,
    })
}
