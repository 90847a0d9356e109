// Cache store with an external Redis backend and an in-process fallback.
//
// Exactly one backing is active at a time. Callers only see `get`, `set`,
// `del`, `exists` and `flush_all`; every backend failure is logged and
// treated as a miss.

pub mod keys;
mod memory;
mod redis_store;

pub use memory::{FALLBACK_HORIZON, MemoryStore, SWEEP_EVERY};
pub use redis_store::RedisStore;

use serde::{Serialize, de::DeserializeOwned};
use std::sync::RwLock;
use std::time::Duration;

use crate::config::CacheConfig;
use crate::error::CacheError;
use crate::metrics::{CACHE_FALLBACK_ACTIVE, CACHE_HITS, CACHE_MISSES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    // terminal for the process lifetime
    FallbackActive,
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub state: ConnectionState,
    pub backend: &'static str,
    pub memory_entries: usize,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

pub struct CacheStore {
    config: CacheConfig,
    state: RwLock<ConnectionState>,
    redis: RwLock<Option<RedisStore>>,
    memory: MemoryStore,
}

impl CacheStore {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            state: RwLock::new(ConnectionState::Disconnected),
            redis: RwLock::new(None),
            memory: MemoryStore::new(),
        }
    }

    // Store that never tries Redis
    pub fn in_memory() -> Self {
        let store = Self::new(CacheConfig::disabled());
        store.transition(ConnectionState::FallbackActive);
        store
    }

    pub fn state(&self) -> ConnectionState {
        self.state.read().map(|s| *s).unwrap_or(ConnectionState::FallbackActive)
    }

    // Try the external backend once; on failure switch to the fallback for good
    pub async fn init(&self) -> ConnectionState {
        match self.state() {
            ConnectionState::Disconnected => {}
            current => return current,
        }

        let url = match self.config.url() {
            Some(url) if !self.config.disabled => url,
            _ => {
                tracing::info!("redis disabled or not configured, using in-memory cache");
                self.transition(ConnectionState::FallbackActive);
                return ConnectionState::FallbackActive;
            }
        };

        self.transition(ConnectionState::Connecting);
        match RedisStore::connect(&self.config, &url).await {
            Ok(store) => {
                if let Ok(mut slot) = self.redis.write() {
                    *slot = Some(store);
                }
                self.transition(ConnectionState::Connected);
            }
            Err(e) => {
                tracing::warn!(error = %e, "redis unreachable, using in-memory cache");
                self.transition(ConnectionState::FallbackActive);
            }
        }
        self.state()
    }

    pub async fn shutdown(&self) {
        if let Ok(mut slot) = self.redis.write() {
            slot.take();
        }
        self.memory.clear();
        self.transition(ConnectionState::Disconnected);
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.active() {
            Some(redis) => swallow("get", redis.get(key).await).flatten(),
            None => self.memory.get(key),
        };

        let value = raw.and_then(|json| swallow("decode", decode::<T>(&json)));
        if value.is_some() {
            CACHE_HITS.inc();
            tracing::debug!(key, "cache hit");
        } else {
            CACHE_MISSES.inc();
            tracing::debug!(key, "cache miss");
        }
        value
    }

    // ttl is only honoured by the Redis backing
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) -> bool {
        let Some(json) = swallow("encode", serde_json::to_string(value).map_err(CacheError::from))
        else {
            return false;
        };

        match self.active() {
            Some(redis) => swallow("set", redis.set(key, &json, ttl).await).is_some(),
            None => {
                self.memory.set(key, json);
                true
            }
        }
    }

    pub async fn del(&self, key: &str) -> bool {
        match self.active() {
            Some(redis) => swallow("del", redis.del(key).await).unwrap_or(false),
            None => self.memory.del(key),
        }
    }

    pub async fn exists(&self, key: &str) -> bool {
        match self.active() {
            Some(redis) => swallow("exists", redis.exists(key).await).unwrap_or(false),
            None => self.memory.exists(key),
        }
    }

    pub async fn flush_all(&self) -> bool {
        match self.active() {
            Some(redis) => swallow("flush", redis.flush_all().await).is_some(),
            None => {
                self.memory.clear();
                true
            }
        }
    }

    pub fn status(&self) -> CacheStatus {
        let state = self.state();
        CacheStatus {
            state,
            backend: if state == ConnectionState::Connected { "redis" } else { "memory" },
            memory_entries: self.memory.len(),
            checked_at: chrono::Utc::now(),
        }
    }

    // Redis handle when connected, None means use the memory map
    fn active(&self) -> Option<RedisStore> {
        if self.state() != ConnectionState::Connected {
            return None;
        }
        self.redis.read().ok().and_then(|slot| slot.clone())
    }

    fn transition(&self, next: ConnectionState) {
        if let Ok(mut state) = self.state.write() {
            let from = *state;
            if from == ConnectionState::FallbackActive && next != ConnectionState::Disconnected {
                return;
            }
            if from != next {
                tracing::info!(from = ?from, to = ?next, "cache state changed");
            }
            *state = next;
        }
        CACHE_FALLBACK_ACTIVE.set(if next == ConnectionState::FallbackActive { 1.0 } else { 0.0 });
    }
}

fn decode<T: DeserializeOwned>(json: &str) -> Result<T, CacheError> {
    Ok(serde_json::from_str(json)?)
}

// Cache failures never escape: log and hand back None
fn swallow<T>(op: &str, result: Result<T, CacheError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(op, error = %e, "cache operation failed, ignoring");
            None
        }
    }
}
