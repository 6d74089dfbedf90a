mod common;

use common::TestApp;
use recipe_service::services::providers::mock::MockTextProvider;
use recipe_service::services::providers::ProviderError;

const ADOBO_REPLY: &str = r#"Here is your recipe:
```json
{
  "name": "Chicken Adobo",
  "servings": 4,
  "cooking_time": "45 minutes",
  "recipe": ["1 kg chicken thighs", "1/2 cup soy sauce", "1/3 cup vinegar"],
  "steps": ["Marinate the chicken", "Braise until tender"],
  "equipment": ["Dutch oven"]
}
```"#;

#[tokio::test]
async fn structured_request_generates_recipe() {
    let app = TestApp::spawn_with(
        MockTextProvider::with_reply(ADOBO_REPLY),
        MockTextProvider::new(),
    )
    .await;

    let response = app
        .post_json(
            "/recipe",
            r#"{"ingredients": ["chicken", "soy sauce"], "servings": 4, "flavorProfile": "Savory"}"#,
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["response"]["name"], "Chicken Adobo");
    assert_eq!(body["response"]["cooking_time"], 45);
    assert_eq!(body["response"]["steps"].as_array().unwrap().len(), 2);
    assert_eq!(body["metadata"]["ingredients"][1], "soy sauce");

    let prompts = app.recipe_model.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Create a Filipino recipe using chicken, soy sauce"));
    assert!(prompts[0].contains("that serves 4 people"));
    assert!(prompts[0].contains("with a savory flavor profile"));
    assert_eq!(app.grocery_model.call_count(), 0);
}

#[tokio::test]
async fn legacy_prompt_is_sent_verbatim() {
    let app = TestApp::spawn_with(
        MockTextProvider::with_reply(ADOBO_REPLY),
        MockTextProvider::new(),
    )
    .await;

    let response = app
        .post_json("/recipe", r#"{"prompt": "A quick weeknight curry"}"#)
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["metadata"]["ingredients"], serde_json::json!([]));
    assert!(body["metadata"]["cuisine"].is_null());
    assert_eq!(app.recipe_model.prompts(), vec!["A quick weeknight curry"]);
}

#[tokio::test]
async fn missing_ingredients_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app.post_json("/recipe", r#"{"ingredients": []}"#).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Missing required field: ingredients or prompt");
    assert_eq!(app.recipe_model.call_count(), 0);
}

#[tokio::test]
async fn non_positive_servings_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json("/recipe", r#"{"ingredients": ["rice"], "servings": 0}"#)
        .await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(app.recipe_model.call_count(), 0);
}

#[tokio::test]
async fn persistent_throttling_returns_busy() {
    let model = MockTextProvider::new();
    model.push(Err(ProviderError::Throttled("slow down".into())));
    model.push(Err(ProviderError::Throttled("slow down".into())));
    let app = TestApp::spawn_with(model, MockTextProvider::new()).await;

    let response = app
        .post_json("/recipe", r#"{"ingredients": ["rice"]}"#)
        .await;

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Model service is busy, please retry later");
    assert_eq!(app.recipe_model.call_count(), 2);
}
