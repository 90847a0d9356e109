use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("translation_requests_total", "Total number of translation requests").unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "translation_request_latency_seconds",
        "Translation request latency in seconds"
    )
    .unwrap();
    pub static ref CACHE_HITS: Counter =
        register_counter!("translation_cache_hits_total", "Total cache hits").unwrap();
    pub static ref CACHE_MISSES: Counter =
        register_counter!("translation_cache_misses_total", "Total cache misses").unwrap();
    pub static ref PROVIDER_CALLS: Counter =
        register_counter!("translation_provider_calls_total", "Requests sent to the translation provider").unwrap();
    pub static ref PROVIDER_RATE_LIMITED: Counter =
        register_counter!("translation_provider_rate_limited_total", "Provider responses signalling rate limiting").unwrap();
    pub static ref CACHE_FALLBACK_ACTIVE: Gauge =
        register_gauge!("translation_cache_fallback_active", "1 when the in-memory fallback cache is in use").unwrap();
}
