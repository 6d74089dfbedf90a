mod common;

use common::TestApp;
use recipe_service::services::providers::mock::MockTextProvider;

#[tokio::test]
async fn grocery_list_is_normalized() {
    let app = TestApp::spawn_with(
        MockTextProvider::new(),
        MockTextProvider::with_reply(
            r#"{"meal_name": "Pasta Bolognese", "servings": 4, "estimated_cost": 18.5, "ingredients": ["spaghetti", "ground beef", "tomato passata"]}"#,
        ),
    )
    .await;

    let response = app
        .post_json("/grocery", r#"{"meal_name": "Pasta Bolognese"}"#)
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["response"]["estimated_cost"], 18.5);
    assert_eq!(body["response"]["ingredients"].as_array().unwrap().len(), 3);
    assert_eq!(body["metadata"]["meal_name"], "Pasta Bolognese");
    assert!(body["metadata"]["budget_limit"].is_null());

    let prompt = &app.grocery_model.prompts()[0];
    assert!(prompt.contains("It should serve 1 person(s)."));
    assert!(prompt.contains("$20.00"));
    assert!(prompt.contains("Region: US."));
}

#[tokio::test]
async fn request_options_reach_prompt_and_metadata() {
    let app = TestApp::spawn_with(
        MockTextProvider::new(),
        MockTextProvider::with_reply(r#"{"meal_name": "Tacos", "estimated_cost": "$31.20"}"#),
    )
    .await;

    let response = app
        .post_json(
            "/grocery",
            r#"{"meal_name": "Tacos", "servings": 6, "budget_limit": 35, "region": "Mexico"}"#,
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["response"]["estimated_cost"], 31.2);
    assert_eq!(body["metadata"]["servings"], 6);
    assert_eq!(body["metadata"]["region"], "Mexico");

    let prompt = &app.grocery_model.prompts()[0];
    assert!(prompt.contains("It should serve 6 person(s)."));
    assert!(prompt.contains("$35.00"));
    assert!(prompt.contains("Region: Mexico."));
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app.post_json("/grocery", "{meal_name: Tacos}").await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Invalid JSON format");
    assert_eq!(app.grocery_model.call_count(), 0);
}

#[tokio::test]
async fn missing_meal_name_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app.post_json("/grocery", r#"{"servings": 2}"#).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Missing required field: meal_name");
}
