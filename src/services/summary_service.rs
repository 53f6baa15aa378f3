use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration as StdDuration, Instant};

use chrono::NaiveDate;
use lru::LruCache;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::insight::{DailyInsight, DayStatus};
use crate::models::recommendation::NutritionRecommendations;
use crate::models::summary::{DailyBalance, DailySummary};
use crate::services::api_client::ApiClient;
use crate::services::insight_service;

/// How long a fetched summary stays fresh before the next read refetches.
const FRESHNESS_WINDOW: StdDuration = StdDuration::from_secs(60);
const CACHE_CAPACITY: usize = 32;

struct CachedSummary {
    summary: DailySummary,
    fetched_at: Instant,
}

/// Date-keyed summary access with a short-lived memoization layer. Summaries
/// are canonicalized at the boundary, so every consumer sees agreeing
/// target columns. Mutating services call [`SummaryService::invalidate`] so
/// the next read refetches.
pub struct SummaryService {
    client: ApiClient,
    cache: Mutex<LruCache<NaiveDate, CachedSummary>>,
}

impl SummaryService {
    pub fn new(client: ApiClient) -> Self {
        let capacity = NonZeroUsize::new(CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            client,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// The canonicalized summary for `date`, served from cache while fresh.
    pub async fn summary(&self, date: NaiveDate) -> AppResult<DailySummary> {
        if let Some(summary) = self.cached(date) {
            debug!(target: "app::cache", %date, "summary cache hit");
            return Ok(summary);
        }

        let summary = self.client.daily_summary(date).await?.canonicalized();

        if let Ok(mut cache) = self.cache.lock() {
            cache.put(
                date,
                CachedSummary {
                    summary: summary.clone(),
                    fetched_at: Instant::now(),
                },
            );
        }

        Ok(summary)
    }

    /// Drops the cached entry for `date`. Called after any meal or activity
    /// mutation touching that day.
    pub fn invalidate(&self, date: NaiveDate) {
        if let Ok(mut cache) = self.cache.lock() {
            if cache.pop(&date).is_some() {
                debug!(target: "app::cache", %date, "summary cache invalidated");
            }
        }
    }

    /// Calendar completion indicator for one day.
    pub async fn day_status(&self, date: NaiveDate) -> AppResult<DayStatus> {
        let summary = self.summary(date).await?;
        Ok(insight_service::day_status(&summary))
    }

    /// Completion indicators for an inclusive date range, e.g. a calendar
    /// month. Days are fetched sequentially; cached days cost nothing.
    pub async fn day_statuses(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<(NaiveDate, DayStatus)>> {
        let mut statuses = Vec::new();
        let mut date = from;
        while date <= to {
            statuses.push((date, self.day_status(date).await?));
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }
        Ok(statuses)
    }

    /// The enriched daily insight for one day.
    pub async fn insight(&self, date: NaiveDate) -> AppResult<DailyInsight> {
        let summary = self.summary(date).await?;
        Ok(insight_service::daily_insight(&summary))
    }

    /// The calorie-balance ledger for the last `limit` days. Not memoized;
    /// history reads are rare compared to day navigation.
    pub async fn history(&self, limit: u32) -> AppResult<Vec<DailyBalance>> {
        self.client.history(limit).await
    }

    /// Personalized recommendations from the last `days` days of logged
    /// data. The backend analyzes 1 to 30 days.
    pub async fn recommendations(&self, days: u32) -> AppResult<NutritionRecommendations> {
        if !(1..=30).contains(&days) {
            return Err(AppError::validation(
                "Le nombre de jours à analyser doit être compris entre 1 et 30",
            ));
        }
        self.client.nutrition_recommendations(days).await
    }

    fn cached(&self, date: NaiveDate) -> Option<DailySummary> {
        let mut cache = self.cache.lock().ok()?;
        let entry = cache.get(&date)?;
        if entry.fetched_at.elapsed() < FRESHNESS_WINDOW {
            Some(entry.summary.clone())
        } else {
            None
        }
    }
}
