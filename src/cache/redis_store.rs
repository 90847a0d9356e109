use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tokio::time::{Duration, sleep, timeout};

use crate::config::CacheConfig;
use crate::error::CacheError;

// Upper bound for the backoff between connection attempts
const MAX_BACKOFF: Duration = Duration::from_secs(2);

// External cache backend
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    // Connect with bounded attempts, each capped by the connect timeout.
    // Gives up after `max_attempts`.
    pub async fn connect(config: &CacheConfig, url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)?;
        let mut last_err = CacheError::Timeout;

        for attempt in 1..=config.max_attempts {
            match timeout(config.connect_timeout, Self::open(&client)).await {
                Ok(Ok(store)) => return Ok(store),
                Ok(Err(e)) => last_err = e,
                Err(_) => last_err = CacheError::Timeout,
            }

            tracing::warn!(attempt, error = %last_err, "redis connection attempt failed");
            if attempt < config.max_attempts {
                sleep(backoff(attempt)).await;
            }
        }

        Err(last_err)
    }

    async fn open(client: &redis::Client) -> Result<Self, CacheError> {
        let mut conn = ConnectionManager::new(client.clone()).await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(Self { conn })
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    pub async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let seconds = ttl.as_secs().max(1);
        let _: () = conn.set_ex(key, value, seconds).await?;
        Ok(())
    }

    pub async fn del(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.conn.clone();
        let removed: u32 = conn.del(key).await?;
        Ok(removed > 0)
    }

    pub async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.conn.clone();
        let found: bool = conn.exists(key).await?;
        Ok(found)
    }

    pub async fn flush_all(&self) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("FLUSHALL").query_async(&mut conn).await?;
        Ok(())
    }
}

// Linear backoff, capped
pub fn backoff(attempt: u32) -> Duration {
    (Duration::from_millis(50) * attempt).min(MAX_BACKOFF)
}
