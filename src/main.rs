use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use translation_gateway::build_router;
use translation_gateway::cache::CacheStore;
use translation_gateway::config::Args;
use translation_gateway::dictionary::UiTranslator;
use translation_gateway::provider::SarvamClient;
use translation_gateway::rate_limit::RateLimiter;
use translation_gateway::state::AppState;
use translation_gateway::translator::TranslationService;

// this is main async function with tokio
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // parse cli arguments
    let args = Args::parse();

    if args.api_key.is_empty() {
        tracing::warn!("SARVAM_API_KEY is not set, translations will fail with a configuration error");
    }

    let cache = Arc::new(CacheStore::new(args.cache_config()));
    let cache_state = cache.init().await;

    let provider = Arc::new(SarvamClient::new(args.provider_config())?);
    let translator = Arc::new(TranslationService::new(
        cache.clone(),
        provider,
        Duration::from_secs(args.cache_ttl),
    ));

    // creating shared state
    let state = Arc::new(AppState {
        cache: cache.clone(),
        translator: translator.clone(),
        ui: UiTranslator::new(translator, args.ui_config()),
        rate_limiter: RateLimiter::new(args.rate_limit, Duration::from_secs(args.rate_window)),
    });

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(port = args.port, "translation gateway listening");
    tracing::info!(cache = ?cache_state, ttl_secs = args.cache_ttl, "cache ready");
    tracing::info!(
        limit = args.rate_limit,
        window_secs = args.rate_window,
        "inbound rate limit"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cache.shutdown().await;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
