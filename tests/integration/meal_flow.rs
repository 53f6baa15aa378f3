use std::time::Duration as StdDuration;

use chrono::NaiveDate;
use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;

use nutriflow_app_lib::commands::{activity, meal, AppState};
use nutriflow_app_lib::models::activity::Intensity;
use nutriflow_app_lib::models::meal::MealPatch;
use nutriflow_app_lib::services::api_client::ApiConfig;
use nutriflow_app_lib::store::LocalStore;

fn state_for(server: &MockServer, dir: &TempDir) -> AppState {
    let config = ApiConfig {
        base_url: server.base_url(),
        http_timeout: StdDuration::from_secs(5),
    };
    let store = LocalStore::new(dir.path().join("nutriflow.db")).expect("store");
    AppState::new(&config, store).expect("state")
}

fn date(s: &str) -> NaiveDate {
    s.parse().expect("date")
}

#[tokio::test]
async fn logged_ingredients_come_back_in_the_meal_list() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/ingredients").json_body(json!({
                "query": "150g de riz et 100g de poulet",
                "type": "diner",
                "date_str": "2026-08-29"
            }));
            then.status(200).json_body(json!({
                "foods": [
                    {
                        "aliment": "riz",
                        "quantite": "150 g",
                        "poids_g": 150.0,
                        "calories": 195.0,
                        "proteines_g": 4.2,
                        "glucides_g": 42.0,
                        "lipides_g": 0.5
                    },
                    {
                        "aliment": "poulet",
                        "quantite": "100 g",
                        "poids_g": 100.0,
                        "calories": 165.0,
                        "proteines_g": 31.0,
                        "glucides_g": 0.0,
                        "lipides_g": 3.6
                    }
                ],
                "totals": {
                    "total_calories": 360.0,
                    "total_proteins_g": 35.2,
                    "total_carbs_g": 42.0,
                    "total_fats_g": 4.1
                }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/meals")
                .query_param("date_str", "2026-08-29");
            then.status(200).json_body(json!([{
                "id": "meal-1",
                "type": "diner",
                "ingredients": [
                    {
                        "id": "item-1",
                        "nom_aliment": "riz",
                        "quantite": 150.0,
                        "unite": "g",
                        "calories": 195.0,
                        "proteines_g": 4.2,
                        "glucides_g": 42.0,
                        "lipides_g": 0.5
                    },
                    {
                        "id": "item-2",
                        "nom_aliment": "poulet",
                        "quantite": 100.0,
                        "unite": "g",
                        "calories": 165.0,
                        "proteines_g": 31.0,
                        "glucides_g": 0.0,
                        "lipides_g": 3.6
                    }
                ]
            }]));
        })
        .await;

    let dir = TempDir::new().expect("tempdir");
    let state = state_for(&server, &dir);
    let day = date("2026-08-29");

    let analysis = meal::meal_log(
        &state,
        "150g de riz et 100g de poulet",
        "diner",
        Some(day),
    )
    .await
    .expect("log");
    assert_eq!(analysis.foods.len(), 2);
    assert_eq!(analysis.totals.total_calories, 360.0);

    let meals = meal::meals_list(&state, day).await.expect("list");
    assert_eq!(meals.len(), 1);
    let items = &meals[0].ingredients;
    assert_eq!(items.len(), 2);
    // macros survive the round trip unchanged
    assert_eq!(items[0].name, "riz");
    assert_eq!(items[0].carbs_g, Some(42.0));
    assert_eq!(items[1].proteins_g, Some(31.0));
}

#[tokio::test]
async fn meal_mutation_invalidates_the_summary_cache() {
    let server = MockServer::start_async().await;
    let summary_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/daily-summary")
                .query_param("date_str", "2026-08-29");
            then.status(200)
                .json_body(json!({ "calories_consumed": 1500.0 }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(httpmock::Method::DELETE).path("/meals/meal-1");
            then.status(200).json_body(json!({ "detail": "Meal deleted" }));
        })
        .await;

    let dir = TempDir::new().expect("tempdir");
    let state = state_for(&server, &dir);
    let day = date("2026-08-29");

    state.summaries().summary(day).await.expect("prime cache");
    state.summaries().summary(day).await.expect("cached");
    assert_eq!(summary_mock.hits_async().await, 1);

    meal::meal_delete(&state, "meal-1", day).await.expect("delete");

    state.summaries().summary(day).await.expect("refetched");
    assert_eq!(summary_mock.hits_async().await, 2);
}

#[tokio::test]
async fn empty_patch_is_rejected_without_a_request() {
    let server = MockServer::start_async().await;
    let catchall = server
        .mock_async(|when, then| {
            when.method(httpmock::Method::PATCH).path("/meals/meal-1");
            then.status(200).json_body(json!({ "id": "meal-1" }));
        })
        .await;

    let dir = TempDir::new().expect("tempdir");
    let state = state_for(&server, &dir);

    let err = meal::meal_edit(&state, "meal-1", &MealPatch::default(), date("2026-08-29"))
        .await
        .expect_err("should fail validation");
    assert_eq!(err.code, "VALIDATION_ERROR");
    assert_eq!(catchall.hits_async().await, 0);
}

#[tokio::test]
async fn logged_activity_scales_calories_and_remembers_prefill() {
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
    let exercise_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/exercise").json_body(json!({
                "query": "45 minutes de course à pied",
                "weight_kg": 70.0,
                "height_cm": 175.0,
                "age": 30,
                "gender": "male"
            }));
            then.status(200).json_body(json!([{
                "name": "course à pied",
                "duration_min": 45.0,
                "calories": 480.0,
                "met": 8.0
            }]));
        })
        .await;

    let dir = TempDir::new().expect("tempdir");
    let state = state_for(&server, &dir);

    let logged = activity::activity_log(&state, "course à pied", 45.0, Intensity::Intense)
        .await
        .expect("log");
    // 480 * 1.3 = 624
    assert_eq!(logged.calories, 624);
    assert_eq!(exercise_mock.hits_async().await, 1);

    let prefill = activity::activity_prefill(&state, "course à pied")
        .await
        .expect("prefill")
        .expect("remembered");
    assert_eq!(prefill.duration_min, 45.0);
    assert_eq!(prefill.intensity, Intensity::Intense);
}

#[tokio::test]
async fn estimate_does_not_touch_the_store() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/user/profile");
            then.status(200).json_body(json!({
                "poids_kg": 70.0,
                "taille_cm": 175.0,
                "age": 30,
                "sexe": "femme"
            }));
        })
        .await;
    let exercise_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/exercise")
                .query_param("preview", "true");
            then.status(200).json_body(json!([{
                "name": "yoga",
                "duration_min": 30.0,
                "calories": 100.0
            }]));
        })
        .await;

    let dir = TempDir::new().expect("tempdir");
    let state = state_for(&server, &dir);

    let estimate = activity::activity_estimate(&state, "yoga", 30.0, Intensity::Light)
        .await
        .expect("estimate");
    // 100 * 0.8 = 80
    assert_eq!(estimate.calories, 80);
    assert_eq!(exercise_mock.hits_async().await, 1);

    let prefill = activity::activity_prefill(&state, "yoga")
        .await
        .expect("prefill");
    assert!(prefill.is_none());
}
