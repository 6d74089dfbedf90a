//! Application startup and lifecycle management.

use crate::config::RecipeServiceConfig;
use crate::routes;
use crate::services::providers::bedrock::{load_client, BedrockTextProvider};
use crate::services::providers::TextProvider;
use crate::services::{CompletionClient, GroceryService, RecipeService};
use axum::Router;
use service_core::error::AppError;
use service_core::retry::BackoffConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub recipes: Arc<RecipeService>,
    pub groceries: Arc<GroceryService>,
}

impl AppState {
    pub fn new(
        recipe_provider: Arc<dyn TextProvider>,
        grocery_provider: Arc<dyn TextProvider>,
        backoff: BackoffConfig,
    ) -> Self {
        Self {
            recipes: Arc::new(RecipeService::new(CompletionClient::new(
                recipe_provider,
                backoff.clone(),
            ))),
            groceries: Arc::new(GroceryService::new(CompletionClient::new(
                grocery_provider,
                backoff,
            ))),
        }
    }
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application against AWS Bedrock.
    pub async fn build(config: RecipeServiceConfig) -> Result<Self, AppError> {
        let client = load_client(&config.bedrock.region, config.bedrock.profile.as_deref()).await;

        let recipe_provider: Arc<dyn TextProvider> = Arc::new(
            BedrockTextProvider::new(client.clone(), &config.bedrock.recipe_model_id)
                .map_err(|e| AppError::ConfigError(e.into()))?,
        );
        let grocery_provider: Arc<dyn TextProvider> = Arc::new(
            BedrockTextProvider::new(client, &config.bedrock.grocery_model_id)
                .map_err(|e| AppError::ConfigError(e.into()))?,
        );

        tracing::info!(
            region = %config.bedrock.region,
            recipe_model = %config.bedrock.recipe_model_id,
            grocery_model = %config.bedrock.grocery_model_id,
            "Initialized Bedrock text providers"
        );

        Self::build_with_providers(config, recipe_provider, grocery_provider).await
    }

    /// Build the application with the given providers (port 0 = random port
    /// for testing).
    pub async fn build_with_providers(
        config: RecipeServiceConfig,
        recipe_provider: Arc<dyn TextProvider>,
        grocery_provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        let state = AppState::new(recipe_provider, grocery_provider, config.retry.backoff());
        let router = routes::router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            e
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("HTTP server listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
