//! API Module
//!
//! HTTP handlers and routing exposing the cacher over REST.
//!
//! # Endpoints
//! - `PUT /data/:key` - Store a JSON value
//! - `GET /data/:key` - Read a value
//! - `DELETE /data/:key` - Delete a key
//! - `POST /data/:key/ttl` - Reset a key's expiry
//! - `GET /stats` - Cacher counters
//! - `GET /health` - Backend health check

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
