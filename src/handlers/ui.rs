use axum::{Json, extract::{Path, State}};
use std::sync::Arc;
use std::time::Instant;

use super::translate::admit;
use crate::error::ApiError;
use crate::metrics::REQUEST_LATENCY;
use crate::models::UiTranslations;
use crate::state::AppState;

// Called by the profile service when a user switches language
pub async fn ui_translations_handler(
    State(state): State<Arc<AppState>>,
    Path(language): Path<String>,
) -> Result<Json<UiTranslations>, ApiError> {
    admit(&state)?;

    let start_time = Instant::now();
    let translations = state.ui.get_ui_translations(&language).await;
    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    Ok(Json(translations?))
}
