use axum::{Json, extract::State};
use std::sync::Arc;
use std::time::Instant;

use crate::error::{ApiError, TranslateError};
use crate::languages::is_supported;
use crate::metrics::{REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::{
    TranslateBatchRequest, TranslateBatchResponse, TranslateTextRequest, TranslateTextResponse,
};
use crate::state::AppState;

pub const MAX_BATCH_TEXTS: usize = 100;

pub(crate) fn admit(state: &AppState) -> Result<(), ApiError> {
    REQUEST_TOTAL.inc();
    if !state.rate_limiter.check("global") {
        return Err(ApiError::Throttled);
    }
    Ok(())
}

pub async fn translate_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TranslateTextRequest>,
) -> Result<Json<TranslateTextResponse>, ApiError> {
    admit(&state)?;

    if payload.text.trim().is_empty() {
        return Err(TranslateError::InvalidInput("text is required".to_string()).into());
    }

    let start_time = Instant::now();
    let result = state
        .translator
        .translate_text(&payload.text, &payload.target_language, &payload.source_language)
        .await;
    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    let translated_text = match (result.success, result.translated_text) {
        (true, Some(text)) => text,
        _ => {
            let message = result.message.unwrap_or_else(|| "translation failed".to_string());
            return Err(result.error.unwrap_or(TranslateError::Provider(message)).into());
        }
    };

    Ok(Json(TranslateTextResponse {
        original_text: payload.text,
        translated_text,
        source_language: result.source_language,
        target_language: result.target_language,
        from_cache: result.from_cache,
        rate_limited: result.rate_limited,
        fallback: result.fallback,
    }))
}

pub async fn translate_batch_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TranslateBatchRequest>,
) -> Result<Json<TranslateBatchResponse>, ApiError> {
    admit(&state)?;

    if payload.texts.is_empty() {
        return Err(TranslateError::InvalidInput("texts must not be empty".to_string()).into());
    }
    if payload.texts.len() > MAX_BATCH_TEXTS {
        return Err(TranslateError::InvalidInput(format!(
            "at most {} texts per batch",
            MAX_BATCH_TEXTS
        ))
        .into());
    }
    for code in [&payload.source_language, &payload.target_language] {
        if !is_supported(code) {
            return Err(TranslateError::UnsupportedLanguage(code.clone()).into());
        }
    }

    let start_time = Instant::now();
    let translations = state
        .translator
        .translate_batch(&payload.texts, &payload.target_language, &payload.source_language)
        .await;
    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    Ok(Json(TranslateBatchResponse { translations }))
}
