use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::activity::{Activity, ActivityUpdate, ExerciseEstimate, Intensity};
use crate::models::profile::UserProfile;
use crate::services::api_client::ApiClient;
use crate::services::summary_service::SummaryService;
use crate::store::{ActivityPrefill, LocalStore};

/// A calorie estimate for one activity, after intensity scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledEstimate {
    pub activity: String,
    pub duration_min: f64,
    pub intensity: Intensity,
    pub calories: i64,
    pub matches: Vec<ExerciseEstimate>,
}

/// Activity logging with MET-based calorie estimation. The analyzer speaks
/// French, so queries are built as `"{durée} minutes de {activité}"`.
/// Last-used duration and intensity are remembered per activity name for
/// prefilling.
pub struct ActivityService {
    client: ApiClient,
    summaries: Arc<SummaryService>,
    store: LocalStore,
}

impl ActivityService {
    pub fn new(client: ApiClient, summaries: Arc<SummaryService>, store: LocalStore) -> Self {
        Self {
            client,
            summaries,
            store,
        }
    }

    pub async fn activities(&self, date: NaiveDate) -> AppResult<Vec<Activity>> {
        self.client.activities(date).await
    }

    /// Estimates calories burned without persisting anything.
    pub async fn estimate(
        &self,
        activity: &str,
        duration_min: f64,
        intensity: Intensity,
        profile: &UserProfile,
    ) -> AppResult<ScaledEstimate> {
        self.analyze(activity, duration_min, intensity, profile, true)
            .await
    }

    /// Analyzes and logs the activity server-side, then remembers the
    /// duration/intensity for this activity name and invalidates today's
    /// summary. The returned calories include the intensity multiplier.
    pub async fn log(
        &self,
        activity: &str,
        duration_min: f64,
        intensity: Intensity,
        profile: &UserProfile,
    ) -> AppResult<ScaledEstimate> {
        let estimate = self
            .analyze(activity, duration_min, intensity, profile, false)
            .await?;

        self.store.remember_activity(
            activity,
            ActivityPrefill {
                duration_min,
                intensity,
            },
        )?;
        info!(
            target: "app::activities",
            activity,
            duration_min,
            calories = estimate.calories,
            "activity logged"
        );
        self.summaries.invalidate(today());

        Ok(estimate)
    }

    pub async fn update(
        &self,
        activity_id: &str,
        update: &ActivityUpdate,
        date: NaiveDate,
    ) -> AppResult<Activity> {
        let activity = self.client.update_activity(activity_id, update).await?;

        if let (Some(description), Some(duration_min)) =
            (update.description.as_deref(), update.duration_min)
        {
            self.store.remember_activity(
                description,
                ActivityPrefill {
                    duration_min,
                    intensity: update.intensity.unwrap_or_default(),
                },
            )?;
        }
        self.summaries.invalidate(date);

        Ok(activity)
    }

    pub async fn delete(&self, activity_id: &str, date: NaiveDate) -> AppResult<()> {
        self.client.delete_activity(activity_id).await?;
        info!(target: "app::activities", activity_id, %date, "activity deleted");
        self.summaries.invalidate(date);
        Ok(())
    }

    /// Recognized activity names, for completion.
    pub async fn sports(&self) -> AppResult<Vec<String>> {
        self.client.sports().await
    }

    /// Last-used duration/intensity for an activity name, if any.
    pub fn prefill_for(&self, activity: &str) -> AppResult<Option<ActivityPrefill>> {
        Ok(self.store.recent_activities()?.remove(activity))
    }

    async fn analyze(
        &self,
        activity: &str,
        duration_min: f64,
        intensity: Intensity,
        profile: &UserProfile,
        preview: bool,
    ) -> AppResult<ScaledEstimate> {
        if activity.trim().is_empty() {
            return Err(AppError::validation("Le nom de l'activité est vide"));
        }
        if duration_min <= 0.0 {
            return Err(AppError::validation("La durée doit être positive"));
        }

        let query = format!("{} minutes de {}", duration_min, activity);
        let matches = self
            .client
            .analyze_exercise(
                &query,
                profile.weight_kg,
                profile.height_cm,
                profile.age,
                profile.sex.as_gender(),
                preview,
            )
            .await?;

        let base = matches.first().map(|m| m.calories).unwrap_or(0.0);
        let calories = (base * intensity.multiplier()).round() as i64;

        Ok(ScaledEstimate {
            activity: activity.to_string(),
            duration_min,
            intensity,
            calories,
            matches,
        })
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
