mod cache;
mod health;
mod languages;
mod metrics;
mod translate;
mod ui;

pub use cache::{cache_flush_handler, cache_status_handler};
pub use health::health_handler;
pub use languages::languages_handler;
pub use metrics::metrics_handler;
pub use translate::{MAX_BATCH_TEXTS, translate_batch_handler, translate_handler};
pub use ui::ui_translations_handler;
