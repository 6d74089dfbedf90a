use recipe_service::config::{BedrockConfig, RecipeServiceConfig, RetrySettings};
use recipe_service::services::providers::mock::MockTextProvider;
use recipe_service::startup::Application;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub recipe_model: Arc<MockTextProvider>,
    pub grocery_model: Arc<MockTextProvider>,
}

fn test_config() -> RecipeServiceConfig {
    RecipeServiceConfig {
        common: CoreConfig {
            port: 0, // Random port for testing
            ..CoreConfig::default()
        },
        bedrock: BedrockConfig {
            region: "us-east-1".to_string(),
            profile: None,
            recipe_model_id: "mock-recipe".to_string(),
            grocery_model_id: "mock-grocery".to_string(),
        },
        retry: RetrySettings {
            max_retries: 2,
            base_delay_ms: 10,
            timeout_secs: 5,
        },
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(MockTextProvider::new(), MockTextProvider::new()).await
    }

    pub async fn spawn_with(recipe_model: MockTextProvider, grocery_model: MockTextProvider) -> Self {
        let recipe_model = Arc::new(recipe_model);
        let grocery_model = Arc::new(grocery_model);

        let app = Application::build_with_providers(
            test_config(),
            recipe_model.clone(),
            grocery_model.clone(),
        )
        .await
        .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            recipe_model,
            grocery_model,
        }
    }

    pub async fn post_json(&self, path: &str, body: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}{}", self.address, path))
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to execute request")
    }
}
