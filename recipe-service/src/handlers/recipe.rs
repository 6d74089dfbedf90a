use crate::handlers::parse_body;
use crate::models::{ModelReply, NormalizedRecipeResponse, RecipeInput, RecipeMetadata};
use crate::startup::AppState;
use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use service_core::error::AppError;

#[derive(Debug, Serialize)]
pub struct RecipeEnvelope {
    pub response: ModelReply<NormalizedRecipeResponse>,
    pub metadata: RecipeMetadata,
}

/// `POST /recipe`
pub async fn generate_recipe(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RecipeEnvelope>, AppError> {
    let body = parse_body(&body)?;
    let envelope = handle(&state, body).await?;
    Ok(Json(envelope))
}

pub async fn handle(state: &AppState, body: Value) -> Result<RecipeEnvelope, AppError> {
    let input = RecipeInput::from_body(body)?;
    let response = state.recipes.generate(&input).await?;

    Ok(RecipeEnvelope {
        response,
        metadata: input.metadata(),
    })
}
