//! recipe-service: recipe and grocery-list generation over a hosted text
//! model.
//!
//! The HTTP surface is built by [`startup::Application`]. Hosts that deliver
//! requests without an HTTP envelope (a route key plus the raw JSON body)
//! call [`invoke`] with an [`AppState`] instead:
//!
//! ```ignore
//! let state = AppState::new(recipe_provider, grocery_provider, BackoffConfig::default());
//! let envelope = recipe_service::invoke(&state, "/grocery", br#"{"meal_name": "Stew"}"#).await?;
//! ```
pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod startup;

pub use handlers::invoke;
pub use startup::AppState;
