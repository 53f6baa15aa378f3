use std::collections::HashMap;
use std::env;
use std::time::Duration as StdDuration;

use chrono::NaiveDate;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::error::{ApiErrorCode, AppError, AppResult};
use crate::models::activity::{Activity, ActivityUpdate, ExerciseEstimate};
use crate::models::meal::{IngredientAnalysis, Meal, MealPatch};
use crate::models::product::{ProductDetails, ProductSummary};
use crate::models::profile::{ProfileUpdate, UserGoals, UserProfile};
use crate::models::recommendation::NutritionRecommendations;
use crate::models::summary::{DailyBalance, DailySummary};

const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP configuration, resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub http_timeout: StdDuration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            http_timeout: StdDuration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let base_url = env::var("NUTRIFLOW_API_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let http_timeout = env::var("NUTRIFLOW_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(StdDuration::from_secs)
            .unwrap_or_else(|| StdDuration::from_secs(DEFAULT_TIMEOUT_SECS));

        ApiConfig {
            base_url,
            http_timeout,
        }
    }
}

/// Typed client for the NutriFlow backend. One method per endpoint; every
/// request carries a correlation id for log matching.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn try_new(config: &ApiConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Some(StdDuration::from_secs(90)))
            .build()
            .map_err(|err| {
                AppError::other(format!("Initialisation du client HTTP impossible: {err}"))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ----- profile -----

    /// `GET /user/profile`. A 404 means no profile has been created yet and
    /// is not an error.
    pub async fn get_profile(&self) -> AppResult<Option<UserProfile>> {
        let path = "/user/profile";
        let (response, correlation_id) =
            self.send(self.client.get(self.url(path)), path).await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(target: "app::api", correlation_id = %correlation_id, "no profile yet");
            return Ok(None);
        }
        self.decode(response, path, &correlation_id).await.map(Some)
    }

    /// `POST /user/profile/update`. Returns the profile with server-computed
    /// TDEE fields.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> AppResult<UserProfile> {
        let path = "/user/profile/update";
        self.execute(self.client.post(self.url(path)).json(update), path)
            .await
    }

    /// `GET /user/goals`.
    pub async fn get_goals(&self) -> AppResult<UserGoals> {
        let path = "/user/goals";
        self.execute(self.client.get(self.url(path)), path).await
    }

    // ----- daily summary -----

    /// `GET /daily-summary?date_str=`.
    pub async fn daily_summary(&self, date: NaiveDate) -> AppResult<DailySummary> {
        let path = "/daily-summary";
        self.execute(
            self.client
                .get(self.url(path))
                .query(&[("date_str", date.to_string())]),
            path,
        )
        .await
    }

    /// `GET /history?limit=`.
    pub async fn history(&self, limit: u32) -> AppResult<Vec<DailyBalance>> {
        let path = "/history";
        self.execute(
            self.client
                .get(self.url(path))
                .query(&[("limit", limit.to_string())]),
            path,
        )
        .await
    }

    /// `GET /nutrition-recommendations?days=`: pattern analysis over the
    /// last `days` days with concrete food suggestions.
    pub async fn nutrition_recommendations(
        &self,
        days: u32,
    ) -> AppResult<NutritionRecommendations> {
        let path = "/nutrition-recommendations";
        self.execute(
            self.client
                .get(self.url(path))
                .query(&[("days", days.to_string())]),
            path,
        )
        .await
    }

    // ----- meals -----

    /// `GET /meals?date_str=`: the day's meals with their ingredient lines.
    pub async fn meals(&self, date: NaiveDate) -> AppResult<Vec<Meal>> {
        let path = "/meals";
        self.execute(
            self.client
                .get(self.url(path))
                .query(&[("date_str", date.to_string())]),
            path,
        )
        .await
    }

    /// `PATCH /meals/{id}`: line additions, updates and deletions in one
    /// request. Returns the meal as stored afterwards.
    pub async fn patch_meal(&self, meal_id: &str, patch: &MealPatch) -> AppResult<Meal> {
        let path = format!("/meals/{meal_id}");
        self.execute(self.client.patch(self.url(&path)).json(patch), &path)
            .await
    }

    /// `DELETE /meals/{id}`.
    pub async fn delete_meal(&self, meal_id: &str) -> AppResult<()> {
        let path = format!("/meals/{meal_id}");
        self.execute_unit(self.client.delete(self.url(&path)), &path)
            .await
    }

    /// `DELETE /meal-items/{id}`.
    pub async fn delete_meal_item(&self, item_id: &str) -> AppResult<()> {
        let path = format!("/meal-items/{item_id}");
        self.execute_unit(self.client.delete(self.url(&path)), &path)
            .await
    }

    /// `POST /ingredients`: analyze a free-text ingredient description and
    /// log the resulting meal.
    pub async fn analyze_ingredients(
        &self,
        query: &str,
        meal_type: &str,
        date: Option<NaiveDate>,
    ) -> AppResult<IngredientAnalysis> {
        let path = "/ingredients";
        let body = json!({
            "query": query,
            "type": meal_type,
            "date_str": date.map(|d| d.to_string()),
        });
        self.execute(self.client.post(self.url(path)).json(&body), path)
            .await
    }

    // ----- activities -----

    /// `GET /activities?date=`.
    pub async fn activities(&self, date: NaiveDate) -> AppResult<Vec<Activity>> {
        let path = "/activities";
        self.execute(
            self.client
                .get(self.url(path))
                .query(&[("date", date.to_string())]),
            path,
        )
        .await
    }

    /// `POST /exercise`: MET-based calorie analysis of a free-text activity
    /// description. With `preview` the backend estimates without persisting.
    pub async fn analyze_exercise(
        &self,
        query: &str,
        weight_kg: f64,
        height_cm: f64,
        age: u32,
        gender: &str,
        preview: bool,
    ) -> AppResult<Vec<ExerciseEstimate>> {
        let path = "/exercise";
        let body = json!({
            "query": query,
            "weight_kg": weight_kg,
            "height_cm": height_cm,
            "age": age,
            "gender": gender,
        });
        let mut request = self.client.post(self.url(path)).json(&body);
        if preview {
            request = request.query(&[("preview", "true")]);
        }
        self.execute(request, path).await
    }

    /// `PATCH /activities/{id}`.
    pub async fn update_activity(
        &self,
        activity_id: &str,
        update: &ActivityUpdate,
    ) -> AppResult<Activity> {
        let path = format!("/activities/{activity_id}");
        self.execute(self.client.patch(self.url(&path)).json(update), &path)
            .await
    }

    /// `DELETE /activities/{id}`.
    pub async fn delete_activity(&self, activity_id: &str) -> AppResult<()> {
        let path = format!("/activities/{activity_id}");
        self.execute_unit(self.client.delete(self.url(&path)), &path)
            .await
    }

    /// `GET /sports`: recognized activity names.
    pub async fn sports(&self) -> AppResult<Vec<String>> {
        let path = "/sports";
        self.execute(self.client.get(self.url(path)), path).await
    }

    /// `GET /units`: French-to-English unit mapping.
    pub async fn units(&self) -> AppResult<HashMap<String, String>> {
        let path = "/units";
        self.execute(self.client.get(self.url(path)), path).await
    }

    // ----- products -----

    /// `POST /barcode`: look a product up and log it as a meal item.
    pub async fn scan_barcode(
        &self,
        barcode: &str,
        quantity_g: f64,
        meal_type: &str,
        date: Option<NaiveDate>,
    ) -> AppResult<ProductSummary> {
        let path = "/barcode";
        let body = json!({
            "barcode": barcode,
            "quantity": quantity_g,
            "type": meal_type,
            "date_str": date.map(|d| d.to_string()),
        });
        self.execute(self.client.post(self.url(path)).json(&body), path)
            .await
    }

    /// `GET /products/{barcode}/details`.
    pub async fn product_details(&self, barcode: &str) -> AppResult<ProductDetails> {
        let path = format!("/products/{barcode}/details");
        self.execute(self.client.get(self.url(&path)), &path).await
    }

    /// `GET /search?query=`: free-text product search.
    pub async fn search_product(&self, query: &str) -> AppResult<ProductSummary> {
        let path = "/search";
        self.execute(
            self.client.get(self.url(path)).query(&[("query", query)]),
            path,
        )
        .await
    }

    // ----- plumbing -----

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> AppResult<T> {
        let (response, correlation_id) = self.send(request, path).await?;
        self.decode(response, path, &correlation_id).await
    }

    async fn execute_unit(&self, request: RequestBuilder, path: &str) -> AppResult<()> {
        let (response, correlation_id) = self.send(request, path).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::status_error(status, response, &correlation_id).await)
    }

    async fn send(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> AppResult<(Response, String)> {
        let correlation_id = Uuid::new_v4().to_string();
        debug!(
            target: "app::api",
            %path,
            correlation_id = %correlation_id,
            "sending request"
        );

        let response = request
            .send()
            .await
            .map_err(|err| Self::error_from_reqwest(err, &correlation_id))?;

        debug!(
            target: "app::api",
            %path,
            correlation_id = %correlation_id,
            status = response.status().as_u16(),
            "response received"
        );

        Ok((response, correlation_id))
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        response: Response,
        path: &str,
        correlation_id: &str,
    ) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response, correlation_id).await);
        }

        response.json::<T>().await.map_err(|err| {
            AppError::api_with_details(
                ApiErrorCode::InvalidResponse,
                format!("Réponse illisible de {path}"),
                Some(correlation_id),
                Some(json!({ "reason": err.to_string() })),
            )
        })
    }

    /// Non-2xx: the error body is surfaced verbatim so the backend's own
    /// French detail messages reach the user unchanged.
    async fn status_error(status: StatusCode, response: Response, correlation_id: &str) -> AppError {
        let body = response.text().await.unwrap_or_default();
        let code = match status {
            StatusCode::NOT_FOUND => ApiErrorCode::NotFound,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiErrorCode::InvalidRequest
            }
            status if status.is_server_error() => ApiErrorCode::ServiceUnavailable,
            _ => ApiErrorCode::Unknown,
        };
        AppError::api_with_details(
            code,
            format!("Erreur API {}: {}", status.as_u16(), body),
            Some(correlation_id),
            None,
        )
    }

    fn error_from_reqwest(err: reqwest::Error, correlation_id: &str) -> AppError {
        if err.is_timeout() {
            AppError::api_with_details(
                ApiErrorCode::HttpTimeout,
                "Le serveur NutriFlow ne répond pas (délai dépassé)",
                Some(correlation_id),
                None,
            )
        } else if err.is_connect() {
            AppError::api_with_details(
                ApiErrorCode::NetworkUnreachable,
                "Connexion au serveur NutriFlow impossible",
                Some(correlation_id),
                None,
            )
        } else {
            AppError::api_with_details(
                ApiErrorCode::Unknown,
                format!("Requête HTTP échouée: {err}"),
                Some(correlation_id),
                None,
            )
        }
    }
}
