use chrono::NaiveDate;
use serde::Serialize;

use crate::models::product::{ProductDetails, ProductSummary, ScaledNutrition};
use crate::services::product_service::ProductService;

use super::{AppState, CommandResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub product: ProductSummary,
    pub nutrition: ScaledNutrition,
}

/// Scan a barcode, log the product as a meal item and return its facts
/// scaled to the requested quantity.
pub async fn product_scan(
    state: &AppState,
    barcode: &str,
    quantity_g: f64,
    meal_type: &str,
    date: Option<NaiveDate>,
) -> CommandResult<ScanResult> {
    let product = state
        .products()
        .scan(barcode, quantity_g, meal_type, date)
        .await?;
    let nutrition = ProductService::scaled_nutrition(&product, quantity_g);
    Ok(ScanResult { product, nutrition })
}

pub async fn product_details_get(state: &AppState, barcode: &str) -> CommandResult<ProductDetails> {
    Ok(state.products().details(barcode).await?)
}

pub async fn product_search(state: &AppState, query: &str) -> CommandResult<ProductSummary> {
    Ok(state.products().search(query).await?)
}
