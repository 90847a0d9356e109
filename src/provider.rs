use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;
use crate::error::TranslateError;
use crate::languages::provider_locale;
use crate::metrics::{PROVIDER_CALLS, PROVIDER_RATE_LIMITED};

// Provider error code signalling rate limiting
pub const RATE_LIMIT_CODE: &str = "rate_limit_exceeded_error";

// Single-text translation backend
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslateError>;
}

// Provider request body
#[derive(Serialize, Debug)]
pub struct TranslateRequest<'a> {
    pub input: &'a str,
    pub source_language_code: &'a str,
    pub target_language_code: &'a str,
    pub speaker_gender: &'a str,
    pub mode: &'a str,
    pub model: &'a str,
    pub enable_preprocessing: bool,
}

// Provider success body
#[derive(Deserialize, Debug)]
pub struct TranslateResponse {
    pub translated_text: String,
}

#[derive(Deserialize, Debug, Default)]
struct ErrorBody {
    #[serde(default)]
    error: ErrorDetail,
}

#[derive(Deserialize, Debug, Default)]
struct ErrorDetail {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

pub struct SarvamClient {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl SarvamClient {
    pub fn new(config: ProviderConfig) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TranslateError::Configuration(format!("HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn build_request<'a>(text: &'a str, source: &'a str, target: &'a str) -> TranslateRequest<'a> {
        TranslateRequest {
            input: text,
            source_language_code: source,
            target_language_code: target,
            speaker_gender: "Male",
            mode: "formal",
            model: "mayura:v1",
            enable_preprocessing: true,
        }
    }
}

#[async_trait]
impl Translator for SarvamClient {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslateError> {
        if source == target {
            return Ok(text.to_string());
        }
        if self.config.api_key.is_empty() {
            return Err(TranslateError::Configuration("SARVAM_API_KEY is not set".to_string()));
        }

        let source_locale = provider_locale(source)
            .ok_or_else(|| TranslateError::UnsupportedLanguage(source.to_string()))?;
        let target_locale = provider_locale(target)
            .ok_or_else(|| TranslateError::UnsupportedLanguage(target.to_string()))?;

        PROVIDER_CALLS.inc();
        let res = self
            .client
            .post(&self.config.endpoint)
            .header("api-subscription-key", &self.config.api_key)
            .json(&Self::build_request(text, source_locale, target_locale))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslateError::Provider("request timed out".to_string())
                } else {
                    TranslateError::Provider(format!("request failed: {}", e))
                }
            })?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let err = classify_failure(status, &body);
            if err == TranslateError::RateLimited {
                PROVIDER_RATE_LIMITED.inc();
            }
            tracing::warn!(%status, error = %err, "translation provider returned an error");
            return Err(err);
        }

        let body: TranslateResponse = res
            .json()
            .await
            .map_err(|e| TranslateError::Provider(format!("malformed response: {}", e)))?;
        Ok(body.translated_text)
    }
}

// Map a non-2xx provider response onto our error kinds
pub fn classify_failure(status: StatusCode, body: &str) -> TranslateError {
    let detail = serde_json::from_str::<ErrorBody>(body).unwrap_or_default().error;

    if status == StatusCode::TOO_MANY_REQUESTS || detail.code.as_deref() == Some(RATE_LIMIT_CODE) {
        return TranslateError::RateLimited;
    }

    let message = detail
        .message
        .or(detail.code)
        .unwrap_or_else(|| body.chars().take(200).collect());
    TranslateError::Provider(format!("HTTP {}: {}", status.as_u16(), message))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Copy)]
    pub enum Behavior {
        // "[hi] Hello"
        Prefix,
        RateLimited,
        Fail,
        MissingKey,
        // Prefix for the first n calls, rate limited afterwards
        RateLimitAfter(usize),
    }

    // Scriptable provider that records every call
    pub struct FakeTranslator {
        behavior: Mutex<Behavior>,
        calls: AtomicUsize,
        failing: Mutex<Vec<String>>,
    }

    impl FakeTranslator {
        pub fn new(behavior: Behavior) -> Self {
            Self {
                behavior: Mutex::new(behavior),
                calls: AtomicUsize::new(0),
                failing: Mutex::new(Vec::new()),
            }
        }

        pub fn set_behavior(&self, behavior: Behavior) {
            *self.behavior.lock().unwrap() = behavior;
        }

        // Fail only these texts, regardless of behavior
        pub fn fail_on(&self, text: &str) {
            self.failing.lock().unwrap().push(text.to_string());
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Translator for FakeTranslator {
        async fn translate(&self, text: &str, _source: &str, target: &str) -> Result<String, TranslateError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.lock().unwrap().iter().any(|t| t == text) {
                return Err(TranslateError::Provider("scripted failure".to_string()));
            }
            let behavior = *self.behavior.lock().unwrap();
            match behavior {
                Behavior::Prefix => Ok(format!("[{}] {}", target, text)),
                Behavior::RateLimited => Err(TranslateError::RateLimited),
                Behavior::Fail => Err(TranslateError::Provider("provider down".to_string())),
                Behavior::MissingKey => {
                    Err(TranslateError::Configuration("SARVAM_API_KEY is not set".to_string()))
                }
                Behavior::RateLimitAfter(n) if call < n => Ok(format!("[{}] {}", target, text)),
                Behavior::RateLimitAfter(_) => Err(TranslateError::RateLimited),
            }
        }
    }
}
