use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::time::{Duration, Instant};

// Fixed horizon of the fallback cache. Requested TTLs are not honoured here.
pub const FALLBACK_HORIZON: Duration = Duration::from_secs(60 * 60);

// Sweep the whole map every N writes
pub const SWEEP_EVERY: u64 = 100;

// In-process fallback store: values + parallel insertion timestamps
pub struct MemoryStore {
    values: DashMap<String, String>,
    stored_at: DashMap<String, Instant>,
    writes: AtomicU64,
    horizon: Duration,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_horizon(FALLBACK_HORIZON)
    }

    pub fn with_horizon(horizon: Duration) -> Self {
        Self {
            values: DashMap::new(),
            stored_at: DashMap::new(),
            writes: AtomicU64::new(0),
            horizon,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        if self.evict_if_expired(key) {
            return None;
        }
        self.values.get(key).map(|v| v.value().clone())
    }

    pub fn set(&self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
        self.stored_at.insert(key.to_string(), Instant::now());

        let writes = self.writes.fetch_add(1, Ordering::Relaxed) + 1;
        if writes % SWEEP_EVERY == 0 {
            let evicted = self.sweep();
            tracing::debug!(evicted, "fallback cache sweep");
        }
    }

    pub fn del(&self, key: &str) -> bool {
        self.stored_at.remove(key);
        self.values.remove(key).is_some()
    }

    pub fn exists(&self, key: &str) -> bool {
        if self.evict_if_expired(key) {
            return false;
        }
        self.values.contains_key(key)
    }

    pub fn clear(&self) {
        self.values.clear();
        self.stored_at.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // Remove every entry past the horizon, returns how many went
    pub fn sweep(&self) -> usize {
        let expired: Vec<String> = self
            .stored_at
            .iter()
            .filter(|entry| entry.value().elapsed() > self.horizon)
            .map(|entry| entry.key().clone())
            .collect();

        for key in &expired {
            self.del(key);
        }
        expired.len()
    }

    // true when the key was present and expired (and is now gone)
    fn evict_if_expired(&self, key: &str) -> bool {
        let expired = match self.stored_at.get(key) {
            Some(stored) => stored.elapsed() > self.horizon,
            None => false,
        };
        if expired {
            self.del(key);
        }
        expired
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn entries_survive_within_horizon() {
        let store = MemoryStore::new();
        store.set("k", "v".to_string());

        tokio::time::advance(Duration::from_secs(59 * 60)).await;
        assert_eq!(store.get("k").as_deref(), Some("v"));
        assert!(store.exists("k"));
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entries_are_evicted_on_read() {
        let store = MemoryStore::new();
        store.set("k", "v".to_string());

        tokio::time::advance(FALLBACK_HORIZON + Duration::from_secs(1)).await;
        assert_eq!(store.get("k"), None);
        assert_eq!(store.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn exists_evicts_expired_entries() {
        let store = MemoryStore::new();
        store.set("k", "v".to_string());

        tokio::time::advance(FALLBACK_HORIZON + Duration::from_secs(1)).await;
        assert!(!store.exists("k"));
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn every_hundredth_write_sweeps_stale_entries() {
        let store = MemoryStore::new();
        for i in 0..10 {
            store.set(&format!("old-{i}"), "x".to_string());
        }
        tokio::time::advance(FALLBACK_HORIZON + Duration::from_secs(1)).await;

        // writes 11..=99 leave the stale ones in place
        for i in 0..89 {
            store.set(&format!("new-{i}"), "y".to_string());
        }
        assert_eq!(store.len(), 99);

        // the 100th write triggers the sweep
        store.set("trigger", "z".to_string());
        assert_eq!(store.len(), 90);
        assert!(store.get("old-0").is_none());
        assert_eq!(store.get("new-0").as_deref(), Some("y"));
    }

    #[test]
    fn overwrite_and_delete() {
        let store = MemoryStore::new();
        store.set("k", "1".to_string());
        store.set("k", "2".to_string());
        assert_eq!(store.get("k").as_deref(), Some("2"));

        assert!(store.del("k"));
        assert!(!store.del("k"));
        assert_eq!(store.get("k"), None);
    }
}
