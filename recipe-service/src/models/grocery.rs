use super::fields::{amount_field, count_field, string_field, string_list_field};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service_core::error::AppError;
use validator::Validate;

pub const MISSING_MEAL_NAME: &str = "Missing required field: meal_name";

/// Grocery-list request. Serializes back unchanged as response metadata.
///
/// Zero `servings` or `budget_limit` reads as unset, so the prompt falls back
/// to its defaults. Negative values are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GroceryRequest {
    meal_name: String,
    #[serde(default)]
    servings: Option<u32>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "budget_limit must not be negative"))]
    budget_limit: Option<f64>,
    #[serde(default)]
    region: Option<String>,
}

impl GroceryRequest {
    pub fn from_body(body: Value) -> Result<Self, AppError> {
        let Value::Object(fields) = &body else {
            return Err(AppError::Validation(
                "Request body must be a JSON object".to_string(),
            ));
        };

        let has_meal_name = match fields.get("meal_name") {
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Null) | None => false,
            Some(_) => true,
        };
        if !has_meal_name {
            return Err(AppError::Validation(MISSING_MEAL_NAME.to_string()));
        }

        let request: GroceryRequest = serde_json::from_value(body)
            .map_err(|e| AppError::Validation(format!("Invalid grocery request: {}", e)))?;
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(request)
    }

    pub fn meal_name(&self) -> &str {
        &self.meal_name
    }

    pub fn servings(&self) -> Option<u32> {
        self.servings.filter(|n| *n > 0)
    }

    pub fn budget_limit(&self) -> Option<f64> {
        self.budget_limit.filter(|b| *b > 0.0)
    }

    pub fn region(&self) -> Option<&str> {
        self.region
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedGroceryResponse {
    pub meal_name: String,
    pub servings: u32,
    pub estimated_cost: f64,
    pub ingredients: Vec<String>,
}

impl NormalizedGroceryResponse {
    /// Project a parsed model reply onto the grocery schema. Never fails.
    pub fn from_value(value: &Value) -> Self {
        Self {
            meal_name: string_field(value, "meal_name"),
            servings: count_field(value, "servings"),
            estimated_cost: amount_field(value, "estimated_cost"),
            ingredients: string_list_field(value, "ingredients"),
        }
    }
}
