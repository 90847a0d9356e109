use clap::Parser;
use std::time::Duration;

pub const DEFAULT_PROVIDER_URL: &str = "https://api.sarvam.ai/translate";

// CLI argument structure, every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "translation-gateway")]
#[command(about = "Caching translation service for the app UI and content")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // Translation provider credentials
    #[arg(long, env = "SARVAM_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, env = "SARVAM_API_URL", default_value = DEFAULT_PROVIDER_URL)]
    pub api_url: String,

    // Provider request timeout in seconds
    #[arg(long, env = "TRANSLATE_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout: u64,

    // Redis backend, no host means in-memory cache only
    #[arg(long, env = "REDIS_HOST")]
    pub redis_host: Option<String>,

    #[arg(long, env = "REDIS_PORT", default_value_t = 6379)]
    pub redis_port: u16,

    #[arg(long, env = "REDIS_PASSWORD", hide_env_values = true)]
    pub redis_password: Option<String>,

    #[arg(long, env = "REDIS_DISABLED")]
    pub redis_disabled: bool,

    // Cache TTL in seconds for translations
    #[arg(short, long, env = "CACHE_TTL_SECS", default_value_t = 24 * 60 * 60)]
    pub cache_ttl: u64,

    // UI dictionary chunking
    #[arg(long, env = "UI_CHUNK_SIZE", default_value_t = 5)]
    pub chunk_size: usize,

    #[arg(long, env = "UI_CHUNK_DELAY_MS", default_value_t = 500)]
    pub chunk_delay_ms: u64,

    // Rate limit max requests per window
    #[arg(long, env = "RATE_LIMIT", default_value_t = 60)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, env = "RATE_WINDOW", default_value_t = 60)]
    pub rate_window: u64,
}

impl Args {
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            host: self.redis_host.clone().filter(|h| !h.is_empty()),
            port: self.redis_port,
            password: self.redis_password.clone().filter(|p| !p.is_empty()),
            disabled: self.redis_disabled,
            ..CacheConfig::default()
        }
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            api_key: self.api_key.clone(),
            endpoint: self.api_url.clone(),
            timeout: Duration::from_secs(self.request_timeout),
        }
    }

    pub fn ui_config(&self) -> UiConfig {
        UiConfig {
            chunk_size: self.chunk_size.max(1),
            chunk_delay: Duration::from_millis(self.chunk_delay_ms),
            cache_ttl: Duration::from_secs(self.cache_ttl),
            ..UiConfig::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub host: Option<String>,
    pub port: u16,
    pub password: Option<String>,
    pub disabled: bool,
    pub connect_timeout: Duration,
    pub max_attempts: u32,
}

impl CacheConfig {
    pub fn disabled() -> Self {
        Self { disabled: true, ..Self::default() }
    }

    pub fn url(&self) -> Option<String> {
        let host = self.host.as_deref()?;
        Some(match &self.password {
            Some(password) => format!("redis://:{}@{}:{}/", password, host, self.port),
            None => format!("redis://{}:{}/", host, self.port),
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: 6379,
            password: None,
            disabled: false,
            connect_timeout: Duration::from_secs(3),
            max_attempts: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub chunk_size: usize,
    pub chunk_delay: Duration,
    pub cache_ttl: Duration,
    // how long a rate-limited English stand-in stays cached
    pub rate_limited_ttl: Duration,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            chunk_size: 5,
            chunk_delay: Duration::from_millis(500),
            cache_ttl: Duration::from_secs(24 * 60 * 60),
            rate_limited_ttl: Duration::from_secs(5 * 60),
        }
    }
}
