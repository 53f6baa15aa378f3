//! Pins the documented quirk of the daily summary: the "remaining" figure
//! and the server's calorie balance are both burn-aware, so they are not
//! mirror images of each other. Their sum is exactly twice the calories
//! burned, and both are displayed as-is.

use std::time::Duration as StdDuration;

use chrono::NaiveDate;
use httpmock::prelude::*;
use serde_json::json;

use nutriflow_app_lib::models::insight::{BalanceStatus, DeviationStatus};
use nutriflow_app_lib::models::summary::DailySummary;
use nutriflow_app_lib::services::api_client::{ApiClient, ApiConfig};
use nutriflow_app_lib::services::insight_service;
use nutriflow_app_lib::services::summary_service::SummaryService;

fn fixture() -> DailySummary {
    DailySummary {
        calories_consumed: Some(230.0),
        target_calories: Some(2038.5),
        calories_burned: Some(367.5),
        calorie_balance: Some(-1441.0),
        ..Default::default()
    }
}

#[test]
fn remaining_plus_balance_equals_twice_burned() {
    let summary = fixture();

    let remaining = insight_service::remaining_calories(&summary);
    let balance = summary.calorie_balance.unwrap();

    // remaining = target - consumed + burned = 2038.5 - 230 + 367.5
    assert_eq!(remaining, 2176.0);
    // balance = consumed - target + burned, served by the API
    assert_eq!(balance, 230.0 - 2038.5 + 367.5);
    // the two figures are NOT negations of each other
    assert_ne!(remaining, -balance);
    assert_eq!(remaining + balance, 2.0 * summary.calories_burned.unwrap());
}

#[test]
fn fixture_progress_rounds_to_eleven_percent() {
    let progress = insight_service::calories_progress(&fixture());
    // 230 / 2039 = 11.28% → 11
    assert_eq!(progress.percentage, 11);
    assert_eq!(progress.display_percentage, 11);
    assert_eq!(progress.target, 2039);
}

#[test]
fn fixture_classifies_as_deep_deficit() {
    let summary = fixture();
    let insight = insight_service::daily_insight(&summary);

    assert_eq!(insight.balance_status, BalanceStatus::Deficit);
    // 230 vs 2038.5: ((230 - 2038.5) / 2038.5) * 100 = -88.7 → -89
    assert_eq!(insight.macro_deviations.calories.percentage, -89);
    assert_eq!(
        insight.macro_deviations.calories.status,
        DeviationStatus::Danger
    );
}

#[test]
fn missing_target_defaults_remaining_through_zero() {
    let summary = DailySummary {
        calories_consumed: Some(230.0),
        calories_burned: Some(367.5),
        ..Default::default()
    };
    assert_eq!(insight_service::remaining_calories(&summary), 137.5);
}

#[tokio::test]
async fn quirk_survives_the_fetch_and_canonicalization_path() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/daily-summary")
                .query_param("date_str", "2026-08-29");
            then.status(200).json_body(json!({
                "calories_consumed": 230.0,
                "target_calories": 2038.5,
                "calories_burned": 367.5,
                "calorie_balance": -1441.0
            }));
        })
        .await;

    let config = ApiConfig {
        base_url: server.base_url(),
        http_timeout: StdDuration::from_secs(5),
    };
    let client = ApiClient::try_new(&config).expect("client");
    let summaries = SummaryService::new(client);

    let day: NaiveDate = "2026-08-29".parse().expect("date");
    let summary = summaries.summary(day).await.expect("summary");

    let remaining = insight_service::remaining_calories(&summary);
    assert_eq!(remaining, 2176.0);
    assert_eq!(
        remaining + summary.calorie_balance.unwrap(),
        2.0 * summary.calories_burned.unwrap()
    );
    // canonicalization copied the target into the legacy column without
    // touching the balance fields
    assert_eq!(summary.calories_goal, Some(2038.5));
    assert_eq!(summary.calorie_balance, Some(-1441.0));
}
