use crate::models::{ModelReply, NormalizedRecipeResponse, RecipeInput};
use crate::services::completion::{parse_model_reply, CompletionClient};
use crate::services::prompt::build_recipe_prompt;
use crate::services::providers::GenerationParams;
use service_core::error::AppError;
use std::borrow::Cow;

pub const RECIPE_GENERATION: GenerationParams = GenerationParams {
    temperature: Some(0.7),
    top_p: None,
    max_tokens: Some(1000),
};

/// Recipe generation: prompt, invoke, normalize.
pub struct RecipeService {
    client: CompletionClient,
}

impl RecipeService {
    pub fn new(client: CompletionClient) -> Self {
        Self { client }
    }

    pub async fn generate(
        &self,
        input: &RecipeInput,
    ) -> Result<ModelReply<NormalizedRecipeResponse>, AppError> {
        let prompt = match input {
            RecipeInput::Legacy { prompt } => Cow::Borrowed(prompt.as_str()),
            RecipeInput::Structured(request) => Cow::Owned(build_recipe_prompt(request)),
        };

        let raw = self.client.complete(&prompt, &RECIPE_GENERATION).await?;
        let reply = parse_model_reply(&raw, NormalizedRecipeResponse::from_value);

        tracing::info!(
            model = %self.client.model_id(),
            legacy = matches!(input, RecipeInput::Legacy { .. }),
            parsed = reply.normalized().is_some(),
            "Recipe generated"
        );

        Ok(reply)
    }
}
