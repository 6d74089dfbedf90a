use crate::handlers::parse_body;
use crate::models::{GroceryRequest, ModelReply, NormalizedGroceryResponse};
use crate::startup::AppState;
use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use service_core::error::AppError;

#[derive(Debug, Serialize)]
pub struct GroceryEnvelope {
    pub response: ModelReply<NormalizedGroceryResponse>,
    /// The request as received; absent options serialize as `null`.
    pub metadata: GroceryRequest,
}

/// `POST /grocery`
pub async fn generate_grocery_list(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GroceryEnvelope>, AppError> {
    let body = parse_body(&body)?;
    let envelope = handle(&state, body).await?;
    Ok(Json(envelope))
}

pub async fn handle(state: &AppState, body: Value) -> Result<GroceryEnvelope, AppError> {
    let request = GroceryRequest::from_body(body)?;
    let response = state.groceries.generate(&request).await?;

    Ok(GroceryEnvelope {
        response,
        metadata: request,
    })
}
