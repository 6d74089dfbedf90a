//! Route table and HTTP router.
//!
//! Business routes and `/health` carry CORS headers. Unknown paths fall
//! through to a 404 without them. `OPTIONS` on any path is answered by the
//! preflight layer before routing.

use crate::handlers;
use crate::startup::AppState;
use axum::{
    http::Uri,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    cors_headers_middleware, preflight_middleware, request_id_middleware,
};
use tower_http::trace::TraceLayer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Recipe,
    Grocery,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Recipe, Route::Grocery];

    pub fn path(self) -> &'static str {
        match self {
            Route::Recipe => "/recipe",
            Route::Grocery => "/grocery",
        }
    }

    pub fn resolve(path: &str) -> Result<Route, AppError> {
        Route::ALL
            .into_iter()
            .find(|route| route.path() == path)
            .ok_or_else(|| AppError::RouteNotFound(path.to_string()))
    }
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}

pub fn router(state: AppState) -> Router {
    let mut app = Router::new().route("/health", get(handlers::health_check));

    for route in Route::ALL {
        app = match route {
            Route::Recipe => app.route(route.path(), post(handlers::generate_recipe)),
            Route::Grocery => app.route(route.path(), post(handlers::generate_grocery_list)),
        };
    }

    app.route_layer(from_fn(cors_headers_middleware))
        .fallback(route_not_found)
        .layer(from_fn(preflight_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
