pub mod grocery;
pub mod health;
pub mod recipe;

pub use grocery::generate_grocery_list;
pub use health::health_check;
pub use recipe::generate_recipe;

use crate::routes::Route;
use crate::startup::AppState;
use serde_json::Value;
use service_core::error::AppError;

/// Parse a request body. An empty body reads as `{}`.
pub fn parse_body(body: &[u8]) -> Result<Value, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body).map_err(AppError::MalformedInput)
}

/// Dispatch a request that arrives without an HTTP envelope: a route key
/// such as `/recipe` and the raw JSON body.
pub async fn invoke(state: &AppState, route_key: &str, body: &[u8]) -> Result<Value, AppError> {
    let route = Route::resolve(route_key)?;
    let body = parse_body(body)?;

    tracing::debug!(route = %route.path(), "Direct invocation");

    let envelope = match route {
        Route::Recipe => serde_json::to_value(recipe::handle(state, body).await?),
        Route::Grocery => serde_json::to_value(grocery::handle(state, body).await?),
    };

    envelope.map_err(|e| AppError::InternalError(e.into()))
}
