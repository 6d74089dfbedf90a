use crate::models::{GroceryRequest, ModelReply, NormalizedGroceryResponse};
use crate::services::completion::{parse_model_reply, CompletionClient};
use crate::services::prompt::build_grocery_prompt;
use crate::services::providers::GenerationParams;
use service_core::error::AppError;

pub const GROCERY_GENERATION: GenerationParams = GenerationParams {
    temperature: Some(0.2),
    top_p: Some(0.9),
    max_tokens: Some(800),
};

/// Grocery-list generation: prompt, invoke, normalize.
pub struct GroceryService {
    client: CompletionClient,
}

impl GroceryService {
    pub fn new(client: CompletionClient) -> Self {
        Self { client }
    }

    pub async fn generate(
        &self,
        request: &GroceryRequest,
    ) -> Result<ModelReply<NormalizedGroceryResponse>, AppError> {
        let prompt = build_grocery_prompt(request);
        let raw = self.client.complete(&prompt, &GROCERY_GENERATION).await?;
        let reply = parse_model_reply(&raw, NormalizedGroceryResponse::from_value);

        tracing::info!(
            model = %self.client.model_id(),
            meal = %request.meal_name(),
            parsed = reply.normalized().is_some(),
            "Grocery list generated"
        );

        Ok(reply)
    }
}
