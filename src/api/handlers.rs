//! API Handlers
//!
//! HTTP request handlers mapping each endpoint onto a cacher operation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::cache::Cacher;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    validate_key, DeleteResponse, GetResponse, HealthResponse, SetRequest, SetResponse,
    StatsResponse, TtlRequest, TtlResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cacher over the configured backend
    pub cacher: Cacher,
    /// TTL applied to writes that do not specify one
    pub default_ttl: u64,
}

impl AppState {
    /// Creates a new AppState around a cacher.
    pub fn new(cacher: Cacher, default_ttl: u64) -> Self {
        Self {
            cacher,
            default_ttl,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(cacher: Cacher, config: &Config) -> Self {
        Self::new(cacher.with_prefix(config.prefix.clone()), config.default_ttl)
    }
}

fn check_key(key: &str) -> Result<()> {
    match validate_key(key) {
        Some(error_msg) => Err(CacheError::InvalidRequest(error_msg)),
        None => Ok(()),
    }
}

/// Handler for PUT /data/:key
///
/// Stores a JSON value under the key, with the request TTL or the default.
pub async fn set_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    check_key(&key)?;

    let ttl = req.ttl.unwrap_or(state.default_ttl);
    state.cacher.set_data(&key, &req.value, ttl).await?;

    Ok(Json(SetResponse::new(key, ttl)))
}

/// Handler for GET /data/:key
///
/// A miss answers 200 with a null value.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    check_key(&key)?;

    let value = state.cacher.get_data::<Value>(&key).await?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for POST /data/:key/ttl
///
/// Resets the expiry and returns the current value; 404 when absent.
pub async fn ttl_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<TtlRequest>,
) -> Result<Json<TtlResponse>> {
    check_key(&key)?;

    let value = state.cacher.set_ttl::<Value>(&key, req.ttl).await?;

    Ok(Json(TtlResponse::new(key, value, req.ttl)))
}

/// Handler for DELETE /data/:key
///
/// Succeeds whether or not the key existed.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    check_key(&key)?;

    state.cacher.delete_data(&key).await?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cacher.stats();

    Json(StatsResponse::new(
        &stats,
        state.cacher.backend_name(),
        state.cacher.prefix(),
    ))
}

/// Handler for GET /health
///
/// Pings the backend; 503 when it does not answer.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let backend = state.cacher.backend_name();
    match state.cacher.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse::healthy(backend))),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse::unhealthy(backend, e.to_string())),
        ),
    }
}
