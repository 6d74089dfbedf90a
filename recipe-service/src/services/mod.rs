pub mod completion;
pub mod extract;
pub mod grocery;
pub mod prompt;
pub mod providers;
pub mod recipe;

pub use completion::CompletionClient;
pub use grocery::GroceryService;
pub use recipe::RecipeService;
