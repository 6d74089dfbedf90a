use crate::models::ModelReply;
use crate::services::extract::extract_json;
use crate::services::providers::{GenerationParams, ProviderError, TextProvider};
use serde_json::Value;
use service_core::error::AppError;
use service_core::retry::{call_with_backoff, BackoffConfig, BackoffError};
use std::sync::Arc;

/// Model invocation shared by the generation services: one provider, called
/// through the backoff client.
#[derive(Clone)]
pub struct CompletionClient {
    provider: Arc<dyn TextProvider>,
    backoff: BackoffConfig,
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn TextProvider>, backoff: BackoffConfig) -> Self {
        Self { provider, backoff }
    }

    pub fn model_id(&self) -> &str {
        self.provider.model_id()
    }

    /// Return the raw model text for `prompt`.
    pub async fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<String, AppError> {
        tracing::debug!(
            model = %self.provider.model_id(),
            prompt_len = prompt.len(),
            "Invoking model"
        );

        let response = call_with_backoff(&self.backoff, "invoke_model", || {
            self.provider.generate(prompt, params)
        })
        .await
        .map_err(into_app_error)?;

        Ok(response.text)
    }
}

fn into_app_error(err: BackoffError<ProviderError>) -> AppError {
    match err {
        BackoffError::TimeoutExceeded { .. } | BackoffError::RetriesExhausted { .. } => {
            AppError::ModelThrottled(err.to_string())
        }
        BackoffError::Operation(provider_err) => AppError::ModelInvocation(provider_err.to_string()),
    }
}

/// Extract, parse and normalize raw model text. Unparsable text becomes a
/// `ModelReply::Failed` carrying the raw response.
pub fn parse_model_reply<T>(raw: &str, normalize: impl FnOnce(&Value) -> T) -> ModelReply<T> {
    let candidate = extract_json(raw);

    match serde_json::from_str::<Value>(&candidate) {
        Ok(value) => ModelReply::from_parsed(&value, normalize),
        Err(e) => {
            tracing::warn!(error = %e, raw_len = raw.len(), "Model reply is not valid JSON");
            ModelReply::unparsable(&e, raw)
        }
    }
}
