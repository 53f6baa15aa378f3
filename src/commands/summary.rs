use chrono::NaiveDate;
use serde::Serialize;

use crate::models::insight::{DailyInsight, DayStatus};
use crate::models::recommendation::NutritionRecommendations;
use crate::models::summary::{DailyBalance, DailySummary};

use super::{AppState, CommandResult};

pub async fn summary_get(state: &AppState, date: NaiveDate) -> CommandResult<DailySummary> {
    Ok(state.summaries().summary(date).await?)
}

pub async fn insight_get(state: &AppState, date: NaiveDate) -> CommandResult<DailyInsight> {
    Ok(state.summaries().insight(date).await?)
}

pub async fn day_status_get(state: &AppState, date: NaiveDate) -> CommandResult<DayStatus> {
    Ok(state.summaries().day_status(date).await?)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStatusEntry {
    pub date: NaiveDate,
    pub status: DayStatus,
}

/// Completion indicators for a calendar range.
pub async fn day_statuses_get(
    state: &AppState,
    from: NaiveDate,
    to: NaiveDate,
) -> CommandResult<Vec<DayStatusEntry>> {
    let statuses = state.summaries().day_statuses(from, to).await?;
    Ok(statuses
        .into_iter()
        .map(|(date, status)| DayStatusEntry { date, status })
        .collect())
}

pub async fn history_get(state: &AppState, limit: u32) -> CommandResult<Vec<DailyBalance>> {
    Ok(state.summaries().history(limit).await?)
}

pub async fn recommendations_get(
    state: &AppState,
    days: u32,
) -> CommandResult<NutritionRecommendations> {
    Ok(state.summaries().recommendations(days).await?)
}
