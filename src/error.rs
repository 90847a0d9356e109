use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde_json::json;
use thiserror::Error;

// Errors a translation can end in
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    #[error("Translation service not configured: {0}")]
    Configuration(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Never reaches an end caller; absorbed into a fallback
    #[error("Translation provider rate limit exceeded")]
    RateLimited,

    #[error("Translation provider error: {0}")]
    Provider(String),
}

impl TranslateError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TranslateError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TranslateError::UnsupportedLanguage(_) => StatusCode::BAD_REQUEST,
            TranslateError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            TranslateError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            TranslateError::Provider(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

// Failures inside the cache store. Swallowed at the CacheStore boundary.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache operation timed out")]
    Timeout,
}

// Error returned by HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    Translate(TranslateError),
    Throttled,
}

impl From<TranslateError> for ApiError {
    fn from(err: TranslateError) -> Self {
        ApiError::Translate(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Translate(err) => (err.status_code(), err.to_string()),
            ApiError::Throttled => (
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded. Try again later.".to_string(),
            ),
        };

        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_fixable_errors_map_to_client_status() {
        assert_eq!(
            TranslateError::UnsupportedLanguage("xx".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TranslateError::InvalidInput("empty".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TranslateError::Provider("boom".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }
}
