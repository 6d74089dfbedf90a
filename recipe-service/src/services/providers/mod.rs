//! Text model provider abstractions and implementations.
//!
//! Services depend on the `TextProvider` trait so the hosted model can be
//! swapped for the scripted mock in tests and local runs.

pub mod bedrock;
pub mod mock;

use async_trait::async_trait;
use service_core::retry::Throttled;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Throttled: {0}")]
    Throttled(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Unexpected response body: {0}")]
    MalformedResponse(String),
}

impl Throttled for ProviderError {
    fn is_throttling(&self) -> bool {
        matches!(self, ProviderError::Throttled(_))
    }
}

/// Text produced by one model invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub text: String,
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub stop_reason: Option<String>,
}

impl ProviderResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            input_tokens: None,
            output_tokens: None,
            stop_reason: None,
        }
    }
}

/// Sampling parameters for a generation request.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationParams {
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_tokens: Option<i32>,
}

/// Request/response shape expected by a hosted model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    /// Plain-text completion (`inputText` in, `results[0].outputText` out).
    TitanText,
    /// Chat-message completion (`messages` in, `content[0].text` out).
    AnthropicMessages,
}

impl ModelFamily {
    /// Infer the family from a model id, accepting regional inference
    /// profile prefixes such as `us.anthropic.…`.
    pub fn from_model_id(model_id: &str) -> Option<Self> {
        let id = model_id.to_ascii_lowercase();
        let has_vendor = |vendor: &str| {
            id.starts_with(vendor) || id.contains(&format!(".{}", vendor))
        };

        if has_vendor("anthropic.") {
            Some(ModelFamily::AnthropicMessages)
        } else if has_vendor("amazon.titan-text") {
            Some(ModelFamily::TitanText)
        } else {
            None
        }
    }
}

/// Trait for text generation providers.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Identifier of the model this provider invokes.
    fn model_id(&self) -> &str;

    /// Generate a completion for `prompt`.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;
}
