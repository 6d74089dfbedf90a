mod fields;
pub mod grocery;
pub mod recipe;
pub mod reply;

pub use grocery::{GroceryRequest, NormalizedGroceryResponse};
pub use recipe::{NormalizedRecipeResponse, RecipeInput, RecipeMetadata, RecipeRequest};
pub use reply::{ModelErrorPayload, ModelReply};
