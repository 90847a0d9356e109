// Translated copies of the app's UI dictionary.
//
// The canonical dictionary maps each English phrase to itself. A translated
// dictionary always carries exactly the canonical keys; a phrase that could
// not be translated keeps its English value.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::time::sleep;

use crate::cache::keys;
use crate::config::UiConfig;
use crate::error::TranslateError;
use crate::languages::{DEFAULT_SOURCE, is_supported};
use crate::models::UiTranslations;
use crate::translator::TranslationService;

pub static CANONICAL_PHRASES: &[&str] = &[
    "Home",
    "Profile",
    "Settings",
    "Language",
    "Login",
    "Logout",
    "Register",
    "Email",
    "Password",
    "Verify OTP",
    "Resend OTP",
    "Never share your OTP with anyone",
    "Financial Calculators",
    "EMI Calculator",
    "SIP Calculator",
    "Loan Amount",
    "Interest Rate",
    "Loan Tenure",
    "Monthly EMI",
    "Monthly Investment",
    "Expected Return",
    "Calculate",
    "Report Fraud",
    "Fraud Type",
    "Description",
    "Location",
    "Submit Report",
    "Report submitted successfully",
    "Quiz",
    "Start Quiz",
    "Next Question",
    "Your Score",
    "Chat with Assistant",
    "Type your message",
    "Send",
    "Learn about fraud",
    "Stay safe online",
    "Cancel",
    "Save",
    "Loading...",
    "Something went wrong",
    "Try again",
];

pub fn canonical_dictionary() -> BTreeMap<String, String> {
    identity_map(CANONICAL_PHRASES.iter().map(|p| p.to_string()))
}

fn identity_map(phrases: impl IntoIterator<Item = String>) -> BTreeMap<String, String> {
    phrases.into_iter().map(|p| (p.clone(), p)).collect()
}

pub struct UiTranslator {
    service: Arc<TranslationService>,
    phrases: Vec<String>,
    config: UiConfig,
}

impl UiTranslator {
    pub fn new(service: Arc<TranslationService>, config: UiConfig) -> Self {
        let phrases = CANONICAL_PHRASES.iter().map(|p| p.to_string()).collect();
        Self::with_phrases(service, config, phrases)
    }

    pub fn with_phrases(service: Arc<TranslationService>, config: UiConfig, phrases: Vec<String>) -> Self {
        Self { service, phrases, config }
    }

    pub fn canonical(&self) -> BTreeMap<String, String> {
        identity_map(self.phrases.iter().cloned())
    }

    pub async fn get_ui_translations(&self, target: &str) -> Result<UiTranslations, TranslateError> {
        if !is_supported(target) {
            return Err(TranslateError::UnsupportedLanguage(target.to_string()));
        }

        let cache = self.service.cache();
        let key = keys::ui_dictionary_key(target);
        if let Some(mut cached) = cache.get::<UiTranslations>(&key).await {
            cached.from_cache = true;
            return Ok(cached);
        }

        if target == DEFAULT_SOURCE {
            let english = self.english(target);
            cache.set(&key, &english, self.config.cache_ttl).await;
            return Ok(english);
        }

        let (translations, rate_limited) = self.translate_chunks(target).await?;
        let result = UiTranslations {
            language: target.to_string(),
            translations,
            from_cache: false,
            rate_limited,
        };

        // partial dictionaries only stay around briefly
        let ttl = if rate_limited { self.config.rate_limited_ttl } else { self.config.cache_ttl };
        cache.set(&key, &result, ttl).await;
        Ok(result)
    }

    // Sequential chunks with a pause between them, never after the last one.
    // Stops at the first chunk the provider refuses outright; keys not yet
    // translated keep their English value. The flag reports that early stop.
    async fn translate_chunks(&self, target: &str) -> Result<(BTreeMap<String, String>, bool), TranslateError> {
        let mut translations = self.canonical();
        let chunks: Vec<&[String]> = self.phrases.chunks(self.config.chunk_size.max(1)).collect();
        let total = chunks.len();

        for (i, chunk) in chunks.into_iter().enumerate() {
            let results = self.service.translate_batch(chunk, target, DEFAULT_SOURCE).await;

            // a missing credential is the caller's to fix, nothing gets cached
            if let Some(err) = results.iter().find_map(|r| match &r.error {
                Some(err @ TranslateError::Configuration(_)) => Some(err.clone()),
                _ => None,
            }) {
                return Err(err);
            }

            if !results.is_empty() && results.iter().all(|r| r.rate_limited) {
                tracing::warn!(lang = target, chunk = i + 1, total, "UI translation rate limited, keeping English for the rest");
                return Ok((translations, true));
            }

            for (phrase, result) in chunk.iter().zip(results) {
                if result.success {
                    translations.insert(phrase.clone(), result.translated);
                }
            }
            tracing::debug!(lang = target, chunk = i + 1, total, "UI chunk translated");

            if i + 1 < total {
                sleep(self.config.chunk_delay).await;
            }
        }

        Ok((translations, false))
    }

    fn english(&self, target: &str) -> UiTranslations {
        UiTranslations {
            language: target.to_string(),
            translations: self.canonical(),
            from_cache: false,
            rate_limited: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::provider::testing::{Behavior, FakeTranslator};
    use crate::translator::DEFAULT_CACHE_TTL;
    use std::collections::BTreeSet;
    use tokio::time::{Duration, Instant};

    fn translator(behavior: Behavior, phrases: Option<Vec<String>>) -> (UiTranslator, Arc<FakeTranslator>) {
        let fake = Arc::new(FakeTranslator::new(behavior));
        let service = Arc::new(TranslationService::new(
            Arc::new(CacheStore::in_memory()),
            fake.clone(),
            DEFAULT_CACHE_TTL,
        ));
        let ui = match phrases {
            Some(phrases) => UiTranslator::with_phrases(service, UiConfig::default(), phrases),
            None => UiTranslator::new(service, UiConfig::default()),
        };
        (ui, fake)
    }

    fn keys_of(map: &BTreeMap<String, String>) -> BTreeSet<&String> {
        map.keys().collect()
    }

    #[test]
    fn canonical_dictionary_is_identity() {
        let dict = canonical_dictionary();
        assert_eq!(dict.len(), CANONICAL_PHRASES.len());
        assert!(dict.iter().all(|(k, v)| k == v));
    }

    #[tokio::test(start_paused = true)]
    async fn translates_every_key() {
        let (ui, _) = translator(Behavior::Prefix, None);
        let out = ui.get_ui_translations("hi").await.unwrap();

        assert_eq!(keys_of(&out.translations), keys_of(&canonical_dictionary()));
        assert_eq!(out.translations["Home"], "[hi] Home");
        assert!(!out.from_cache);
    }

    #[tokio::test(start_paused = true)]
    async fn key_set_survives_total_provider_failure() {
        let (ui, _) = translator(Behavior::Fail, None);
        let out = ui.get_ui_translations("mr").await.unwrap();

        assert_eq!(out.translations, canonical_dictionary());
        assert!(!out.rate_limited);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_entries_keep_english() {
        let (ui, fake) = translator(Behavior::Prefix, None);
        fake.fail_on("Logout");

        let out = ui.get_ui_translations("bn").await.unwrap();
        assert_eq!(out.translations["Logout"], "Logout");
        assert_eq!(out.translations["Login"], "[bn] Login");
    }

    #[tokio::test(start_paused = true)]
    async fn english_needs_no_provider() {
        let (ui, fake) = translator(Behavior::Fail, None);
        let out = ui.get_ui_translations("en").await.unwrap();

        assert_eq!(out.translations, canonical_dictionary());
        assert_eq!(fake.calls(), 0);

        let again = ui.get_ui_translations("en").await.unwrap();
        assert!(again.from_cache);
    }

    #[tokio::test(start_paused = true)]
    async fn cached_dictionary_bypasses_chunking() {
        let (ui, fake) = translator(Behavior::Prefix, None);
        ui.get_ui_translations("te").await.unwrap();
        let calls = fake.calls();

        let start = Instant::now();
        let out = ui.get_ui_translations("te").await.unwrap();
        assert!(out.from_cache);
        assert_eq!(fake.calls(), calls);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn chunk_cadence_for_twelve_entries() {
        let phrases: Vec<String> = (1..=12).map(|i| format!("phrase {i}")).collect();
        let (ui, fake) = translator(Behavior::Prefix, Some(phrases));

        let start = Instant::now();
        let out = ui.get_ui_translations("gu").await.unwrap();
        let elapsed = start.elapsed();

        // 3 chunks (5 + 5 + 2), two pauses, none after the last chunk
        assert_eq!(fake.calls(), 12);
        assert_eq!(out.translations.len(), 12);
        assert!(elapsed >= Duration::from_millis(1000));
        assert!(elapsed < Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn single_chunk_has_no_pause() {
        let phrases: Vec<String> = (1..=5).map(|i| format!("p{i}")).collect();
        let (ui, _) = translator(Behavior::Prefix, Some(phrases));

        let start = Instant::now();
        ui.get_ui_translations("kn").await.unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_serves_english_and_stops_early() {
        let (ui, fake) = translator(Behavior::RateLimited, None);
        let out = ui.get_ui_translations("pa").await.unwrap();

        assert!(out.rate_limited);
        assert_eq!(out.translations, canonical_dictionary());
        // only the first chunk was attempted
        assert_eq!(fake.calls(), 5);

        let cached = ui.get_ui_translations("pa").await.unwrap();
        assert!(cached.from_cache);
        assert!(cached.rate_limited);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_midway_keeps_translated_chunks() {
        // first chunk of five goes through, everything after is refused
        let (ui, fake) = translator(Behavior::RateLimitAfter(5), None);
        let out = ui.get_ui_translations("hi").await.unwrap();

        assert!(out.rate_limited);
        assert_eq!(keys_of(&out.translations), keys_of(&canonical_dictionary()));
        for phrase in &CANONICAL_PHRASES[..5] {
            assert_eq!(out.translations[*phrase], format!("[hi] {}", phrase));
        }
        for phrase in &CANONICAL_PHRASES[5..] {
            assert_eq!(out.translations[*phrase], *phrase);
        }
        // stopped after the refused second chunk
        assert_eq!(fake.calls(), 10);

        let cached = ui.get_ui_translations("hi").await.unwrap();
        assert!(cached.from_cache);
        assert_eq!(cached.translations["Home"], "[hi] Home");
    }

    #[tokio::test(start_paused = true)]
    async fn missing_api_key_surfaces_and_caches_nothing() {
        let (ui, _) = translator(Behavior::MissingKey, None);

        let err = ui.get_ui_translations("hi").await.unwrap_err();
        assert!(matches!(err, TranslateError::Configuration(_)));
        assert!(!ui.service.cache().exists(&keys::ui_dictionary_key("hi")).await);
    }

    #[tokio::test]
    async fn unsupported_target_fails_fast() {
        let (ui, fake) = translator(Behavior::Prefix, None);
        let err = ui.get_ui_translations("xx").await.unwrap_err();
        assert_eq!(err, TranslateError::UnsupportedLanguage("xx".into()));
        assert_eq!(fake.calls(), 0);
    }
}
