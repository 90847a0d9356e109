pub mod cache;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod handlers;
pub mod languages;
pub mod metrics;
pub mod models;
pub mod provider;
pub mod rate_limit;
pub mod state;
pub mod translator;

use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .route("/api/translate", post(handlers::translate_handler))
        .route("/api/translate/batch", post(handlers::translate_batch_handler))
        .route("/api/translate/languages", get(handlers::languages_handler))
        .route("/api/translate/ui/{language}", get(handlers::ui_translations_handler))
        .route("/api/translate/cache", delete(handlers::cache_flush_handler))
        .route("/api/translate/cache/status", get(handlers::cache_status_handler))
        .with_state(state)
}
