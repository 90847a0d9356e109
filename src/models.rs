use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::TranslateError;
use crate::languages::DEFAULT_SOURCE;

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

// Outcome of translating one text. Never persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
    pub source_language: String,
    pub target_language: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub from_cache: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub rate_limited: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    // kind of failure, used by the HTTP layer only
    #[serde(skip)]
    pub error: Option<TranslateError>,
}

impl TranslationResult {
    pub fn translated(text: String, source: &str, target: &str) -> Self {
        Self {
            success: true,
            translated_text: Some(text),
            source_language: source.to_string(),
            target_language: target.to_string(),
            from_cache: false,
            rate_limited: false,
            fallback: false,
            message: None,
            error: None,
        }
    }

    pub fn failed(err: TranslateError, source: &str, target: &str) -> Self {
        Self {
            success: false,
            translated_text: None,
            source_language: source.to_string(),
            target_language: target.to_string(),
            from_cache: false,
            rate_limited: false,
            fallback: false,
            message: Some(err.to_string()),
            error: Some(err),
        }
    }

    pub fn cached(mut self) -> Self {
        self.from_cache = true;
        self
    }

    pub fn rate_limited(mut self) -> Self {
        self.rate_limited = true;
        self
    }

    pub fn fallback(mut self) -> Self {
        self.fallback = true;
        self
    }
}

// One slot of a batch translation
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BatchTranslation {
    pub original: String,
    pub translated: String,
    pub success: bool,
    // set when the slot holds the untranslated text because of rate limiting
    #[serde(skip)]
    pub rate_limited: bool,
    #[serde(skip)]
    pub error: Option<TranslateError>,
}

// Translated UI dictionary for one language
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiTranslations {
    pub language: String,
    pub translations: BTreeMap<String, String>,
    #[serde(default)]
    pub from_cache: bool,
    #[serde(default)]
    pub rate_limited: bool,
}

// HTTP bodies

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TranslateTextRequest {
    pub text: String,
    pub target_language: String,
    #[serde(default = "default_source")]
    pub source_language: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TranslateTextResponse {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub from_cache: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub rate_limited: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TranslateBatchRequest {
    pub texts: Vec<String>,
    pub target_language: String,
    #[serde(default = "default_source")]
    pub source_language: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TranslateBatchResponse {
    pub translations: Vec<BatchTranslation>,
}
