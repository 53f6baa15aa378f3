use std::sync::Arc;

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::product::{ProductDetails, ProductSummary, ScaledNutrition};
use crate::services::api_client::ApiClient;
use crate::services::summary_service::SummaryService;

// Same pattern the backend enforces; checking client-side avoids a round
// trip for obviously bad scans.
static BARCODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{8,}$").expect("hardcoded pattern"));

/// Barcode scanning and product lookups.
pub struct ProductService {
    client: ApiClient,
    summaries: Arc<SummaryService>,
}

impl ProductService {
    pub fn new(client: ApiClient, summaries: Arc<SummaryService>) -> Self {
        Self { client, summaries }
    }

    /// Looks the barcode up and logs it as a meal item of `quantity_g`
    /// grams. Returns the product card with its per-100g facts.
    pub async fn scan(
        &self,
        barcode: &str,
        quantity_g: f64,
        meal_type: &str,
        date: Option<NaiveDate>,
    ) -> AppResult<ProductSummary> {
        validate_barcode(barcode)?;
        if quantity_g <= 0.0 {
            return Err(AppError::validation("La quantité doit être positive"));
        }

        let product = self
            .client
            .scan_barcode(barcode, quantity_g, meal_type, date)
            .await?;
        info!(
            target: "app::products",
            barcode,
            quantity_g,
            name = %product.name,
            "product scanned and logged"
        );
        self.summaries.invalidate(date.unwrap_or_else(today));
        Ok(product)
    }

    /// Enriched product record (scores, labels, allergens).
    pub async fn details(&self, barcode: &str) -> AppResult<ProductDetails> {
        validate_barcode(barcode)?;
        self.client.product_details(barcode).await
    }

    /// Free-text product search.
    pub async fn search(&self, query: &str) -> AppResult<ProductSummary> {
        if query.trim().is_empty() {
            return Err(AppError::validation("Le terme de recherche est vide"));
        }
        self.client.search_product(query).await
    }

    /// Nutrition facts for a concrete quantity of a product.
    pub fn scaled_nutrition(product: &ProductSummary, quantity_g: f64) -> ScaledNutrition {
        product.scaled(quantity_g)
    }
}

fn validate_barcode(barcode: &str) -> AppResult<()> {
    if BARCODE_RE.is_match(barcode) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Code-barres invalide: {barcode} (au moins 8 chiffres attendus)"
        )))
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
