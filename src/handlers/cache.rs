use axum::{Json, extract::State};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::cache::CacheStatus;
use crate::state::AppState;

pub async fn cache_status_handler(State(state): State<Arc<AppState>>) -> Json<CacheStatus> {
    Json(state.cache.status())
}

pub async fn cache_flush_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    let flushed = state.cache.flush_all().await;
    tracing::info!(flushed, "cache flush requested");
    Json(json!({ "success": flushed }))
}
