use chrono::NaiveDate;

use crate::models::meal::{IngredientAnalysis, Meal, MealPatch};

use super::{AppState, CommandResult};

pub async fn meals_list(state: &AppState, date: NaiveDate) -> CommandResult<Vec<Meal>> {
    Ok(state.meals().meals(date).await?)
}

/// Analyze a free-text ingredient description in French and log the meal.
pub async fn meal_log(
    state: &AppState,
    query: &str,
    meal_type: &str,
    date: Option<NaiveDate>,
) -> CommandResult<IngredientAnalysis> {
    Ok(state.meals().log_ingredients(query, meal_type, date).await?)
}

pub async fn meal_edit(
    state: &AppState,
    meal_id: &str,
    patch: &MealPatch,
    date: NaiveDate,
) -> CommandResult<Meal> {
    Ok(state.meals().edit_meal(meal_id, patch, date).await?)
}

pub async fn meal_delete(state: &AppState, meal_id: &str, date: NaiveDate) -> CommandResult<()> {
    Ok(state.meals().delete_meal(meal_id, date).await?)
}

pub async fn meal_item_delete(
    state: &AppState,
    item_id: &str,
    date: NaiveDate,
) -> CommandResult<()> {
    Ok(state.meals().delete_item(item_id, date).await?)
}
