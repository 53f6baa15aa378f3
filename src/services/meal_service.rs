use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::meal::{IngredientAnalysis, Meal, MealPatch};
use crate::services::api_client::ApiClient;
use crate::services::summary_service::SummaryService;

/// Meal listing and editing. Every mutation invalidates the summary cache
/// for the affected date so the next dashboard read sees fresh totals.
pub struct MealService {
    client: ApiClient,
    summaries: Arc<SummaryService>,
}

impl MealService {
    pub fn new(client: ApiClient, summaries: Arc<SummaryService>) -> Self {
        Self { client, summaries }
    }

    pub async fn meals(&self, date: NaiveDate) -> AppResult<Vec<Meal>> {
        self.client.meals(date).await
    }

    /// Analyzes a free-text ingredient description and logs the resulting
    /// meal for `date` (today when absent).
    pub async fn log_ingredients(
        &self,
        query: &str,
        meal_type: &str,
        date: Option<NaiveDate>,
    ) -> AppResult<IngredientAnalysis> {
        if query.trim().is_empty() {
            return Err(AppError::validation("La description des ingrédients est vide"));
        }

        let analysis = self.client.analyze_ingredients(query, meal_type, date).await?;
        let day = date.unwrap_or_else(today);
        info!(
            target: "app::meals",
            %day,
            foods = analysis.foods.len(),
            calories = analysis.totals.total_calories,
            "meal logged"
        );
        self.summaries.invalidate(day);
        Ok(analysis)
    }

    /// Applies line additions, updates and deletions to a meal.
    pub async fn edit_meal(
        &self,
        meal_id: &str,
        patch: &MealPatch,
        date: NaiveDate,
    ) -> AppResult<Meal> {
        if patch.is_empty() {
            return Err(AppError::validation("Aucune modification à appliquer"));
        }

        let meal = self.client.patch_meal(meal_id, patch).await?;
        self.summaries.invalidate(date);
        Ok(meal)
    }

    pub async fn delete_meal(&self, meal_id: &str, date: NaiveDate) -> AppResult<()> {
        self.client.delete_meal(meal_id).await?;
        info!(target: "app::meals", meal_id, %date, "meal deleted");
        self.summaries.invalidate(date);
        Ok(())
    }

    pub async fn delete_item(&self, item_id: &str, date: NaiveDate) -> AppResult<()> {
        self.client.delete_meal_item(item_id).await?;
        info!(target: "app::meals", item_id, %date, "meal item deleted");
        self.summaries.invalidate(date);
        Ok(())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
