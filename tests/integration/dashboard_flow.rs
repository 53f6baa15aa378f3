use std::time::Duration as StdDuration;

use chrono::NaiveDate;
use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;

use nutriflow_app_lib::commands::{dashboard, summary as summary_commands, AppState};
use nutriflow_app_lib::models::insight::{DayStatus, DeviationStatus};
use nutriflow_app_lib::services::api_client::{ApiClient, ApiConfig};
use nutriflow_app_lib::services::summary_service::SummaryService;
use nutriflow_app_lib::store::LocalStore;

fn config_for(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: server.base_url(),
        http_timeout: StdDuration::from_secs(5),
    }
}

fn state_for(server: &MockServer, dir: &TempDir) -> AppState {
    let store = LocalStore::new(dir.path().join("nutriflow.db")).expect("store");
    AppState::new(&config_for(server), store).expect("state")
}

fn date(s: &str) -> NaiveDate {
    s.parse().expect("date")
}

#[tokio::test]
async fn summary_is_served_from_cache_while_fresh() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/daily-summary")
                .query_param("date_str", "2026-08-29");
            then.status(200)
                .json_body(json!({ "calories_consumed": 1500.0 }));
        })
        .await;

    let client = ApiClient::try_new(&config_for(&server)).expect("client");
    let summaries = SummaryService::new(client);

    let first = summaries.summary(date("2026-08-29")).await.expect("first");
    let second = summaries.summary(date("2026-08-29")).await.expect("second");
    assert_eq!(first, second);
    assert_eq!(mock.hits_async().await, 1);
}

#[tokio::test]
async fn invalidation_forces_a_refetch() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/daily-summary")
                .query_param("date_str", "2026-08-29");
            then.status(200)
                .json_body(json!({ "calories_consumed": 1500.0 }));
        })
        .await;

    let client = ApiClient::try_new(&config_for(&server)).expect("client");
    let summaries = SummaryService::new(client);
    let day = date("2026-08-29");

    summaries.summary(day).await.expect("first");
    summaries.invalidate(day);
    summaries.summary(day).await.expect("second");
    assert_eq!(mock.hits_async().await, 2);
}

#[tokio::test]
async fn distinct_dates_are_cached_independently() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/daily-summary");
            then.status(200)
                .json_body(json!({ "calories_consumed": 900.0 }));
        })
        .await;

    let client = ApiClient::try_new(&config_for(&server)).expect("client");
    let summaries = SummaryService::new(client);

    summaries.summary(date("2026-08-28")).await.expect("day 1");
    summaries.summary(date("2026-08-29")).await.expect("day 2");
    summaries.summary(date("2026-08-28")).await.expect("cached");
    assert_eq!(mock.hits_async().await, 2);
}

#[tokio::test]
async fn dashboard_falls_back_to_tdee_when_no_target_exists() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/user/profile");
            then.status(200).json_body(json!({
                "poids_kg": 70.0,
                "taille_cm": 175.0,
                "age": 30,
                "sexe": "male"
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/daily-summary")
                .query_param("date_str", "2026-08-29");
            then.status(200).json_body(json!({
                "calories_consumed": 500.0,
                "tdee": 2200.0
            }));
        })
        .await;

    let dir = TempDir::new().expect("tempdir");
    let state = state_for(&server, &dir);

    let data = dashboard::dashboard_overview(&state, date("2026-08-29"))
        .await
        .expect("dashboard");
    assert!(data.profile.is_some());
    assert_eq!(data.target_calories, 2200.0);
    assert_eq!(data.remaining_calories, 1700.0);
}

#[tokio::test]
async fn dashboard_progress_keeps_true_percentage_past_target() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/user/profile");
            then.status(404).json_body(json!({ "detail": "Utilisateur non trouvé" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/daily-summary")
                .query_param("date_str", "2026-08-29");
            then.status(200).json_body(json!({
                "calories_consumed": 2300.0,
                "target_calories": 2000.0
            }));
        })
        .await;

    let dir = TempDir::new().expect("tempdir");
    let state = state_for(&server, &dir);

    let data = dashboard::dashboard_overview(&state, date("2026-08-29"))
        .await
        .expect("dashboard");
    assert!(data.profile.is_none());
    assert_eq!(data.calories_progress.percentage, 115);
    assert_eq!(data.calories_progress.display_percentage, 100);
    assert_eq!(data.calories_progress.status, DeviationStatus::Danger);
    assert_eq!(data.remaining_calories, -300.0);
}

#[tokio::test]
async fn summaries_are_canonicalized_at_the_boundary() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/daily-summary")
                .query_param("date_str", "2026-08-29");
            then.status(200).json_body(json!({
                "calories_consumed": 1800.0,
                "target_calories": 2038.5,
                "target_proteins_g": 120.0,
                "target_carbs_g": 262.0,
                "target_fats_g": 57.0
            }));
        })
        .await;

    let dir = TempDir::new().expect("tempdir");
    let state = state_for(&server, &dir);

    let summary = summary_commands::summary_get(&state, date("2026-08-29"))
        .await
        .expect("summary");
    // both naming schemes agree after the fetch
    assert_eq!(summary.calories_goal, Some(2038.5));
    assert_eq!(summary.proteins_goal, Some(120.0));
    assert_eq!(summary.target_carbs_g, Some(262.0));
}

#[tokio::test]
async fn calendar_range_mixes_day_statuses() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/daily-summary")
                .query_param("date_str", "2026-08-28");
            then.status(200).json_body(json!({}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/daily-summary")
                .query_param("date_str", "2026-08-29");
            then.status(200).json_body(json!({
                "calories_consumed": 2000.0,
                "proteins_consumed": 120.0,
                "carbs_consumed": 262.0,
                "fats_consumed": 57.0,
                "target_calories": 2000.0,
                "target_proteins_g": 120.0,
                "target_carbs_g": 262.0,
                "target_fats_g": 57.0
            }));
        })
        .await;

    let dir = TempDir::new().expect("tempdir");
    let state = state_for(&server, &dir);

    let statuses =
        summary_commands::day_statuses_get(&state, date("2026-08-28"), date("2026-08-29"))
            .await
            .expect("statuses");
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0].status, DayStatus::NoData);
    assert_eq!(statuses[1].status, DayStatus::Excellent);
}
