use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheStore, keys};
use crate::error::TranslateError;
use crate::languages::is_supported;
use crate::models::{BatchTranslation, TranslationResult};
use crate::provider::Translator;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

// Read-through translation over the cache store and a provider
pub struct TranslationService {
    cache: Arc<CacheStore>,
    provider: Arc<dyn Translator>,
    cache_ttl: Duration,
}

impl TranslationService {
    pub fn new(cache: Arc<CacheStore>, provider: Arc<dyn Translator>, cache_ttl: Duration) -> Self {
        Self { cache, provider, cache_ttl }
    }

    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    pub async fn translate_text(&self, text: &str, target: &str, source: &str) -> TranslationResult {
        if target == source {
            return TranslationResult::translated(text.to_string(), source, target);
        }

        for code in [source, target] {
            if !is_supported(code) {
                return TranslationResult::failed(
                    TranslateError::UnsupportedLanguage(code.to_string()),
                    source,
                    target,
                );
            }
        }

        let key = keys::translation_key(source, target, text);
        if let Some(cached) = self.cache.get::<String>(&key).await {
            return TranslationResult::translated(cached, source, target).cached();
        }

        match self.provider.translate(text, source, target).await {
            Ok(translated) => {
                self.cache.set(&key, &translated, self.cache_ttl).await;
                TranslationResult::translated(translated, source, target)
            }
            Err(TranslateError::RateLimited) => {
                // someone else may have filled the slot meanwhile
                if let Some(cached) = self.cache.get::<String>(&key).await {
                    return TranslationResult::translated(cached, source, target)
                        .cached()
                        .rate_limited();
                }
                tracing::warn!(lang = target, "provider rate limited, returning original text");
                TranslationResult::translated(text.to_string(), source, target)
                    .fallback()
                    .rate_limited()
            }
            Err(e) => {
                tracing::warn!(lang = target, error = %e, "translation failed");
                TranslationResult::failed(e, source, target)
            }
        }
    }

    // All texts run concurrently; output order follows input order
    pub async fn translate_batch(&self, texts: &[String], target: &str, source: &str) -> Vec<BatchTranslation> {
        let results = join_all(texts.iter().map(|text| self.translate_text(text, target, source))).await;

        texts
            .iter()
            .zip(results)
            .map(|(original, result)| BatchTranslation {
                original: original.clone(),
                translated: match (result.success, result.translated_text) {
                    (true, Some(translated)) => translated,
                    _ => original.clone(),
                },
                success: result.success,
                rate_limited: result.rate_limited && result.fallback,
                error: result.error,
            })
            .collect()
    }
}
