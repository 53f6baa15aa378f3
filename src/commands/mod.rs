pub mod activity;
pub mod dashboard;
pub mod meal;
pub mod product;
pub mod profile;
pub mod summary;

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map as JsonMap, Value as JsonValue};
use tracing::error;

use crate::error::{AppError, AppResult};
use crate::services::activity_service::ActivityService;
use crate::services::api_client::{ApiClient, ApiConfig};
use crate::services::meal_service::MealService;
use crate::services::product_service::ProductService;
use crate::services::profile_service::ProfileService;
use crate::services::summary_service::SummaryService;
use crate::store::LocalStore;

/// Shared wiring behind every command.
#[derive(Clone)]
pub struct AppState {
    summary_service: Arc<SummaryService>,
    meal_service: Arc<MealService>,
    activity_service: Arc<ActivityService>,
    product_service: Arc<ProductService>,
    profile_service: Arc<ProfileService>,
}

impl AppState {
    pub fn new(config: &ApiConfig, store: LocalStore) -> AppResult<Self> {
        let client = ApiClient::try_new(config)?;
        let summary_service = Arc::new(SummaryService::new(client.clone()));
        let meal_service = Arc::new(MealService::new(
            client.clone(),
            Arc::clone(&summary_service),
        ));
        let activity_service = Arc::new(ActivityService::new(
            client.clone(),
            Arc::clone(&summary_service),
            store,
        ));
        let product_service = Arc::new(ProductService::new(
            client.clone(),
            Arc::clone(&summary_service),
        ));
        let profile_service = Arc::new(ProfileService::new(client));

        Ok(Self {
            summary_service,
            meal_service,
            activity_service,
            product_service,
            profile_service,
        })
    }

    pub fn from_env() -> AppResult<Self> {
        Self::new(&ApiConfig::from_env(), LocalStore::from_env()?)
    }

    pub fn summaries(&self) -> Arc<SummaryService> {
        Arc::clone(&self.summary_service)
    }

    pub fn meals(&self) -> Arc<MealService> {
        Arc::clone(&self.meal_service)
    }

    pub fn activities(&self) -> Arc<ActivityService> {
        Arc::clone(&self.activity_service)
    }

    pub fn products(&self) -> Arc<ProductService> {
        Arc::clone(&self.product_service)
    }

    pub fn profile(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profile_service)
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
}

impl CommandError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<JsonValue>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details,
        }
    }
}

impl From<AppError> for CommandError {
    fn from(error: AppError) -> Self {
        match error {
            AppError::Validation { message, details } => {
                CommandError::new("VALIDATION_ERROR", message, details)
            }
            AppError::NotFound => {
                CommandError::new("NOT_FOUND", "Ressource introuvable", None)
            }
            AppError::Api {
                code,
                message,
                correlation_id,
                details,
            } => {
                let mut merged = JsonMap::new();
                if let Some(existing) = details {
                    match existing {
                        JsonValue::Object(map) => {
                            for (key, value) in map {
                                merged.insert(key, value);
                            }
                        }
                        value => {
                            merged.insert("info".to_string(), value);
                        }
                    }
                }
                if let Some(id) = correlation_id {
                    merged.insert("correlationId".to_string(), JsonValue::String(id));
                }
                let detail_value = if merged.is_empty() {
                    None
                } else {
                    Some(JsonValue::Object(merged))
                };
                CommandError::new(code.as_str(), message, detail_value)
            }
            AppError::Store { message } => CommandError::new("STORE_ERROR", message, None),
            AppError::Serialization(err) => CommandError::new(
                "SERIALIZATION_ERROR",
                format!("Erreur de sérialisation: {err}"),
                None,
            ),
            AppError::Io(err) => {
                CommandError::new("IO_ERROR", format!("Erreur E/S: {err}"), None)
            }
            AppError::Other(message) => {
                error!(target: "app::command", %message, "unexpected command failure");
                CommandError::new("INTERNAL_ERROR", message, None)
            }
        }
    }
}
