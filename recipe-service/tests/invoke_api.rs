use recipe_service::services::providers::mock::MockTextProvider;
use recipe_service::AppState;
use service_core::error::AppError;
use service_core::retry::BackoffConfig;
use std::sync::Arc;

fn state(recipe_model: Arc<MockTextProvider>, grocery_model: Arc<MockTextProvider>) -> AppState {
    AppState::new(recipe_model, grocery_model, BackoffConfig::default())
}

#[tokio::test]
async fn invoke_recipe_route_returns_envelope() {
    let recipe_model = Arc::new(MockTextProvider::with_reply(
        r#"{"name": "Garlic Rice", "servings": 2, "recipe": ["2 cups rice"]}"#,
    ));
    let grocery_model = Arc::new(MockTextProvider::new());

    let envelope = recipe_service::invoke(
        &state(recipe_model.clone(), grocery_model.clone()),
        "/recipe",
        br#"{"ingredients": ["rice", "garlic"], "cuisine": "Filipino"}"#,
    )
    .await
    .expect("invoke failed");

    assert_eq!(envelope["response"]["name"], "Garlic Rice");
    assert_eq!(envelope["metadata"]["cuisine"], "Filipino");
    assert_eq!(recipe_model.call_count(), 1);
    assert_eq!(grocery_model.call_count(), 0);
}

#[tokio::test]
async fn invoke_empty_body_reports_missing_field() {
    let model = Arc::new(MockTextProvider::with_reply("{}"));

    let err = recipe_service::invoke(&state(model.clone(), model.clone()), "/grocery", b"")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(err.client_message(), "Missing required field: meal_name");
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn invoke_malformed_body_is_rejected() {
    let model = Arc::new(MockTextProvider::with_reply("{}"));

    let err = recipe_service::invoke(&state(model.clone(), model.clone()), "/recipe", b"{oops")
        .await
        .unwrap_err();

    assert_eq!(err.client_message(), "Invalid JSON format");
    assert_eq!(model.call_count(), 0);
}
