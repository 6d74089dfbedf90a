use super::fields::{
    count_field, optional_string_field, string_field, string_list_field,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service_core::error::AppError;
use validator::Validate;

pub const MISSING_RECIPE_FIELDS: &str = "Missing required field: ingredients or prompt";

/// Structured recipe request. Fields are read-only once deserialized.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    #[validate(length(min = 1, message = "ingredients must not be empty"))]
    ingredients: Vec<String>,
    #[serde(default)]
    cuisine: Option<String>,
    #[serde(default)]
    meal_type: Option<String>,
    #[serde(default, rename = "dietaryPreferences")]
    dietary_prefs: Option<Vec<String>>,
    #[serde(default)]
    #[validate(range(min = 1, message = "servings must be a positive integer"))]
    servings: Option<u32>,
    #[serde(default)]
    flavor_profile: Option<String>,
    #[serde(default)]
    equipment: Option<Vec<String>>,
    #[serde(default)]
    #[validate(range(min = 1, message = "cookingTime must be a positive number of minutes"))]
    cooking_time: Option<u32>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn non_empty(values: &Option<Vec<String>>) -> Option<&[String]> {
    values.as_deref().filter(|v| !v.is_empty())
}

impl RecipeRequest {
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn cuisine(&self) -> Option<&str> {
        non_blank(&self.cuisine)
    }

    pub fn meal_type(&self) -> Option<&str> {
        non_blank(&self.meal_type)
    }

    pub fn dietary_prefs(&self) -> Option<&[String]> {
        non_empty(&self.dietary_prefs)
    }

    pub fn servings(&self) -> Option<u32> {
        self.servings
    }

    pub fn flavor_profile(&self) -> Option<&str> {
        non_blank(&self.flavor_profile)
    }

    pub fn equipment(&self) -> Option<&[String]> {
        non_empty(&self.equipment)
    }

    pub fn cooking_time(&self) -> Option<u32> {
        self.cooking_time
    }
}

/// Inbound recipe payload, resolved once at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeInput {
    /// Free-text prompt sent to the model verbatim.
    Legacy { prompt: String },
    Structured(RecipeRequest),
}

impl RecipeInput {
    /// A `prompt` key selects the legacy mode; otherwise `ingredients` is
    /// required.
    pub fn from_body(body: Value) -> Result<Self, AppError> {
        let Value::Object(fields) = &body else {
            return Err(AppError::Validation(
                "Request body must be a JSON object".to_string(),
            ));
        };

        if let Some(prompt) = fields.get("prompt") {
            return match prompt {
                Value::String(p) if !p.trim().is_empty() => Ok(RecipeInput::Legacy {
                    prompt: p.clone(),
                }),
                Value::String(_) | Value::Null => {
                    Err(AppError::Validation(MISSING_RECIPE_FIELDS.to_string()))
                }
                _ => Err(AppError::Validation(
                    "Field 'prompt' must be a string".to_string(),
                )),
            };
        }

        let has_ingredients = match fields.get("ingredients") {
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Null) | None => false,
            Some(_) => true,
        };
        if !has_ingredients {
            return Err(AppError::Validation(MISSING_RECIPE_FIELDS.to_string()));
        }

        let request: RecipeRequest = serde_json::from_value(body)
            .map_err(|e| AppError::Validation(format!("Invalid recipe request: {}", e)))?;
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(RecipeInput::Structured(request))
    }

    pub fn metadata(&self) -> RecipeMetadata {
        match self {
            RecipeInput::Legacy { .. } => RecipeMetadata {
                ingredients: Vec::new(),
                cuisine: None,
            },
            RecipeInput::Structured(request) => RecipeMetadata {
                ingredients: request.ingredients.clone(),
                cuisine: request.cuisine.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeMetadata {
    pub ingredients: Vec<String>,
    pub cuisine: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecipeResponse {
    pub name: String,
    pub servings: u32,
    pub cooking_time: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    pub recipe: Vec<String>,
    pub steps: Vec<String>,
    pub equipment: Vec<String>,
}

impl NormalizedRecipeResponse {
    /// Project a parsed model reply onto the recipe schema. Never fails.
    pub fn from_value(value: &Value) -> Self {
        Self {
            name: string_field(value, "name"),
            servings: count_field(value, "servings"),
            cooking_time: count_field(value, "cooking_time"),
            cuisine: optional_string_field(value, "cuisine"),
            recipe: string_list_field(value, "recipe"),
            steps: string_list_field(value, "steps"),
            equipment: string_list_field(value, "equipment"),
        }
    }
}
