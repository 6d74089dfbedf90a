//! Prompt construction for recipe and grocery-list generation.
//!
//! Both builders are pure. The output contract and content rules are only
//! conveyed to the model as instructions; compliance is not checked here.

use crate::models::{GroceryRequest, RecipeRequest};

pub const DEFAULT_CUISINE: &str = "Filipino";
pub const DEFAULT_GROCERY_SERVINGS: u32 = 1;
pub const DEFAULT_BUDGET_LIMIT: f64 = 20.0;
pub const DEFAULT_REGION: &str = "US";

const RECIPE_OUTPUT_CONTRACT: &str = r#"

Respond only with a valid JSON object in this format:
{
  "name": "<recipe name>",
  "servings": <number of servings>,
  "cooking_time": <cooking time in minutes>,
  "cuisine": "<cuisine>",
  "recipe": ["<ingredient with measurement>", "<ingredient with measurement>", ...],
  "steps": ["<step 1>", "<step 2>", ...],
  "equipment": ["<equipment 1>", "<equipment 2>", ...]
}

Rules:
- If the ingredients suggest a real, well-known dish, make that dish.
- Add any essential companion ingredients the dish needs, even if they were not listed.
- Give a specific measurement for every ingredient, e.g. "2 cups jasmine rice".
- Write each step as a short imperative instruction, in cooking order.
- Respect every dietary preference; a vegan recipe must contain no animal products.
- Never include any markdown, explanation, or extra text."#;

/// Build the instruction for a structured recipe request.
pub fn build_recipe_prompt(request: &RecipeRequest) -> String {
    let mut prompt = format!(
        "Create a {} recipe using {}",
        request.cuisine().unwrap_or(DEFAULT_CUISINE),
        request.ingredients().join(", ")
    );

    if let Some(meal_type) = request.meal_type() {
        prompt.push_str(&format!(" for {}", meal_type));
    }

    if let Some(servings) = request.servings() {
        prompt.push_str(&format!(" that serves {} people", servings));
    }

    if let Some(minutes) = request.cooking_time() {
        prompt.push_str(&format!(
            " with a cooking time of about {} minutes",
            minutes
        ));
    }

    if let Some(flavor) = request.flavor_profile() {
        prompt.push_str(&format!(" with a {} flavor profile", flavor.to_lowercase()));
    }

    if let Some(prefs) = request.dietary_prefs() {
        prompt.push_str(&format!(" that is {}", prefs.join(", ")));
    }

    if let Some(equipment) = request.equipment() {
        prompt.push_str(&format!(
            " using the following equipment: {}",
            equipment.join(", ")
        ));
    }

    prompt.push('.');
    prompt.push_str(RECIPE_OUTPUT_CONTRACT);
    prompt
}

/// Build the instruction for a grocery-list request, filling defaults for
/// servings, budget and region.
pub fn build_grocery_prompt(request: &GroceryRequest) -> String {
    format!(
        r#"Generate a grocery list for the meal "{meal}".
It should serve {servings} person(s).
The total budget should not exceed ${budget:.2}.
Region: {region}.

Respond only with a valid JSON object in this format:
{{
  "meal_name": "<meal name>",
  "servings": <number>,
  "estimated_cost": <total estimated cost>,
  "ingredients": ["<ingredient 1>", "<ingredient 2>", ...]
}}

Rules:
- Be realistic with prices and portion sizes.
- Ingredients should reflect what is available in the region.
- Estimate the cost reasonably and stay under the specified budget.
- Never include any markdown, explanation, or extra text."#,
        meal = request.meal_name(),
        servings = request.servings().unwrap_or(DEFAULT_GROCERY_SERVINGS),
        budget = request.budget_limit().unwrap_or(DEFAULT_BUDGET_LIMIT),
        region = request.region().unwrap_or(DEFAULT_REGION),
    )
}
