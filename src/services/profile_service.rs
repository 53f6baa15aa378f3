use std::collections::HashMap;

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::profile::{ProfileUpdate, UserGoals, UserProfile};
use crate::services::api_client::ApiClient;

/// Profile settings and derived objectives.
pub struct ProfileService {
    client: ApiClient,
}

impl ProfileService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `None` until the user has created a profile.
    pub async fn profile(&self) -> AppResult<Option<UserProfile>> {
        self.client.get_profile().await
    }

    /// Partial update; the server recomputes BMR/TDEE and returns the full
    /// profile.
    pub async fn update(&self, update: &ProfileUpdate) -> AppResult<UserProfile> {
        if update.is_empty() {
            return Err(AppError::validation("Aucun champ de profil à mettre à jour"));
        }
        let profile = self.client.update_profile(update).await?;
        info!(
            target: "app::profile",
            tdee = ?profile.tdee,
            "profile updated"
        );
        Ok(profile)
    }

    /// Personalized calorie and macro objectives.
    pub async fn goals(&self) -> AppResult<UserGoals> {
        self.client.get_goals().await
    }

    /// French-to-English unit mapping used by the ingredient analyzer.
    pub async fn units(&self) -> AppResult<HashMap<String, String>> {
        self.client.units().await
    }
}
