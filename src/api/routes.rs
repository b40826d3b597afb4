//! API Routes
//!
//! Configures the Axum router with all cacher endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_handler, get_handler, health_handler, set_handler, stats_handler, ttl_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /data/:key` - Store a JSON value
/// - `GET /data/:key` - Read a value (null on miss)
/// - `DELETE /data/:key` - Delete a key
/// - `POST /data/:key/ttl` - Reset a key's expiry
/// - `GET /stats` - Cacher counters
/// - `GET /health` - Backend health check
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/data/:key",
            get(get_handler).put(set_handler).delete(delete_handler),
        )
        .route("/data/:key/ttl", post(ttl_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
