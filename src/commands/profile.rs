use std::collections::HashMap;

use crate::models::profile::{ProfileUpdate, UserGoals, UserProfile};

use super::{AppState, CommandResult};

pub async fn profile_get(state: &AppState) -> CommandResult<Option<UserProfile>> {
    Ok(state.profile().profile().await?)
}

pub async fn profile_update(
    state: &AppState,
    update: &ProfileUpdate,
) -> CommandResult<UserProfile> {
    Ok(state.profile().update(update).await?)
}

pub async fn goals_get(state: &AppState) -> CommandResult<UserGoals> {
    Ok(state.profile().goals().await?)
}

pub async fn units_get(state: &AppState) -> CommandResult<HashMap<String, String>> {
    Ok(state.profile().units().await?)
}
