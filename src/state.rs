use std::sync::Arc;

use crate::cache::CacheStore;
use crate::dictionary::UiTranslator;
use crate::rate_limit::RateLimiter;
use crate::translator::TranslationService;

// app's shared state, built once in main and handed to every handler
pub struct AppState {
    pub cache: Arc<CacheStore>,
    pub translator: Arc<TranslationService>,
    pub ui: UiTranslator,
    pub rate_limiter: RateLimiter,
}
