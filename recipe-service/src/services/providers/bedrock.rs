//! AWS Bedrock provider implementation.
//!
//! Calls the Bedrock Runtime `InvokeModel` API. The JSON body and the
//! location of the generated text depend on the model family, so request
//! building and response parsing are kept as pure functions keyed by
//! `ModelFamily`.
//!
//! No per-call timeout is configured beyond the SDK defaults.

use super::{GenerationParams, ModelFamily, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use aws_sdk_bedrockruntime::error::{DisplayErrorContext, SdkError};
use aws_sdk_bedrockruntime::operation::invoke_model::InvokeModelError;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Version header required by Anthropic models on Bedrock.
const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Build a Bedrock Runtime client for `region`, optionally using a named
/// credentials profile.
pub async fn load_client(region: &str, profile: Option<&str>) -> BedrockClient {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()));

    if let Some(profile) = profile {
        loader = loader.profile_name(profile);
    }

    let sdk_config = loader.load().await;
    BedrockClient::new(&sdk_config)
}

/// Bedrock text provider bound to one model.
pub struct BedrockTextProvider {
    client: BedrockClient,
    model_id: String,
    family: ModelFamily,
}

impl BedrockTextProvider {
    pub fn new(client: BedrockClient, model_id: impl Into<String>) -> Result<Self, ProviderError> {
        let model_id = model_id.into();
        let family = ModelFamily::from_model_id(&model_id).ok_or_else(|| {
            ProviderError::NotConfigured(format!(
                "Unsupported model id '{}': expected an Anthropic or Titan text model",
                model_id
            ))
        })?;

        Ok(Self {
            client,
            model_id,
            family,
        })
    }
}

#[async_trait]
impl TextProvider for BedrockTextProvider {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        let body = serde_json::to_vec(&request_body(self.family, prompt, params))
            .map_err(|e| ProviderError::InvalidRequest(e.to_string()))?;

        tracing::debug!(
            model = %self.model_id,
            family = ?self.family,
            prompt_len = prompt.len(),
            "Sending request to Bedrock"
        );

        let output = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| convert_invoke_error(&e))?;

        let response = parse_response(self.family, output.body().as_ref())?;

        tracing::debug!(
            model = %self.model_id,
            input_tokens = ?response.input_tokens,
            output_tokens = ?response.output_tokens,
            stop_reason = ?response.stop_reason,
            "Bedrock response received"
        );

        Ok(response)
    }
}

/// JSON request body for `family`.
pub fn request_body(family: ModelFamily, prompt: &str, params: &GenerationParams) -> Value {
    match family {
        ModelFamily::TitanText => {
            let mut config = Map::new();
            if let Some(temperature) = params.temperature {
                config.insert("temperature".into(), json!(temperature));
            }
            if let Some(max_tokens) = params.max_tokens {
                config.insert("maxTokenCount".into(), json!(max_tokens));
            }
            if let Some(top_p) = params.top_p {
                config.insert("topP".into(), json!(top_p));
            }

            json!({
                "inputText": prompt,
                "textGenerationConfig": config,
            })
        }
        ModelFamily::AnthropicMessages => {
            let mut body = json!({
                "anthropic_version": ANTHROPIC_VERSION,
                "max_tokens": params.max_tokens.unwrap_or(1000),
                "messages": [{"role": "user", "content": prompt}],
            });
            if let Some(temperature) = params.temperature {
                body["temperature"] = json!(temperature);
            }
            if let Some(top_p) = params.top_p {
                body["top_p"] = json!(top_p);
            }
            body
        }
    }
}

/// Extract generated text and usage from a response body.
pub fn parse_response(family: ModelFamily, body: &[u8]) -> Result<ProviderResponse, ProviderError> {
    match family {
        ModelFamily::TitanText => {
            let parsed: TitanResponse = serde_json::from_slice(body)
                .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
            let result = parsed.results.into_iter().next().ok_or_else(|| {
                ProviderError::MalformedResponse("Titan response has no results".to_string())
            })?;

            Ok(ProviderResponse {
                text: result.output_text,
                input_tokens: parsed.input_text_token_count,
                output_tokens: result.token_count,
                stop_reason: result.completion_reason,
            })
        }
        ModelFamily::AnthropicMessages => {
            let parsed: AnthropicResponse = serde_json::from_slice(body)
                .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
            let text = parsed
                .content
                .into_iter()
                .find_map(|block| block.text)
                .ok_or_else(|| {
                    ProviderError::MalformedResponse(
                        "Anthropic response has no text content".to_string(),
                    )
                })?;

            Ok(ProviderResponse {
                text,
                input_tokens: parsed.usage.as_ref().and_then(|u| u.input_tokens),
                output_tokens: parsed.usage.as_ref().and_then(|u| u.output_tokens),
                stop_reason: parsed.stop_reason,
            })
        }
    }
}

/// Map SDK failures onto provider errors. `ThrottlingException` is the only
/// kind reported as throttling.
fn convert_invoke_error(err: &SdkError<InvokeModelError>) -> ProviderError {
    match err {
        SdkError::ServiceError(service_err) => match service_err.err() {
            InvokeModelError::ThrottlingException(e) => {
                ProviderError::Throttled(format!("Bedrock throttled: {}", e))
            }
            InvokeModelError::ValidationException(e) => {
                ProviderError::InvalidRequest(format!("Bedrock validation error: {}", e))
            }
            InvokeModelError::AccessDeniedException(e) => {
                ProviderError::NotConfigured(format!("Bedrock access denied: {}", e))
            }
            other => ProviderError::ApiError(format!("Bedrock error: {}", other)),
        },
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            ProviderError::NetworkError(DisplayErrorContext(err).to_string())
        }
        other => ProviderError::ApiError(DisplayErrorContext(other).to_string()),
    }
}

// ============================================================================
// Bedrock model response types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TitanResponse {
    #[serde(default)]
    input_text_token_count: Option<i32>,
    #[serde(default)]
    results: Vec<TitanResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TitanResult {
    output_text: String,
    #[serde(default)]
    token_count: Option<i32>,
    #[serde(default)]
    completion_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicContent>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Option<AnthropicUsage>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: Option<i32>,
    output_tokens: Option<i32>,
}
