//! Router configuration for the console.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::api::handlers::health::health_routes;
use crate::api::handlers::resource::resource_routes;
use crate::api::middleware::{
    error_request_id_middleware, logging_middleware, request_id_middleware,
};
use crate::models::{Brand, Category, Product, User};
use crate::state::AppState;

/// Creates the application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. CORS and compression wrap everything
/// 2. Request ID middleware generates/propagates request IDs
/// 3. Logging middleware logs requests with request IDs
/// 4. Error middleware stamps the request ID into error bodies
///
/// # Routes
/// - `/categories`, `/brands`, `/products`, `/users` - CRUD screens
/// - `/health` - Storage health check
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/categories", resource_routes::<Category>())
        .nest("/brands", resource_routes::<Brand>())
        .nest("/products", resource_routes::<Product>())
        .nest("/users", resource_routes::<User>())
        .merge(health_routes())
        .layer(middleware::from_fn(error_request_id_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
