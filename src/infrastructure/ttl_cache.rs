// In-memory TTL cache for fetched dashboard resources
use crate::domain::resource::{ResourceData, ResourceKey};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Cache used by the orchestrator, one slot per resource.
pub type DashboardCache = TtlCache<ResourceKey, ResourceData>;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache lock poisoned")]
    Poisoned,
}

/// A stored value with its fetch time. Entries are replaced, never mutated.
#[derive(Debug)]
pub struct CacheEntry<V> {
    pub data: Arc<V>,
    pub fetched_at: Instant,
    pub ttl: Duration,
}

impl<V> Clone for CacheEntry<V> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            fetched_at: self.fetched_at,
            ttl: self.ttl,
        }
    }
}

impl<V> CacheEntry<V> {
    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Instant::now())
    }

    /// Fresh iff `now - fetched_at <= ttl`
    pub fn is_fresh_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.fetched_at) <= self.ttl
    }
}

/// Keyed store with logical expiry. Nothing is evicted; stale entries are
/// simply reported as stale and overwritten by the next successful fetch.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &K) -> Result<Option<CacheEntry<V>>, CacheError> {
        let entries = self.entries.read().map_err(|_| CacheError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    /// Return the cached value only while it is still fresh
    pub fn get_fresh(&self, key: &K) -> Result<Option<Arc<V>>, CacheError> {
        Ok(self
            .get(key)?
            .filter(|entry| entry.is_fresh())
            .map(|entry| entry.data))
    }

    pub fn set(&self, key: K, data: V) -> Result<(), CacheError> {
        let entry = CacheEntry {
            data: Arc::new(data),
            fetched_at: Instant::now(),
            ttl: self.ttl,
        };
        let mut entries = self.entries.write().map_err(|_| CacheError::Poisoned)?;
        entries.insert(key, entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_freshness_boundary() {
        let cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_millis(300_000));
        cache.set("sales", 7).unwrap();
        let entry = cache.get(&"sales").unwrap().unwrap();

        assert!(entry.is_fresh_at(entry.fetched_at + Duration::from_millis(299_999)));
        assert!(entry.is_fresh_at(entry.fetched_at + Duration::from_millis(300_000)));
        assert!(!entry.is_fresh_at(entry.fetched_at + Duration::from_millis(300_001)));

        tokio::time::advance(Duration::from_millis(299_999)).await;
        assert_eq!(cache.get_fresh(&"sales").unwrap().as_deref(), Some(&7));

        tokio::time::advance(Duration::from_millis(2)).await;
        assert_eq!(cache.get_fresh(&"sales").unwrap(), None);
        // Stale entries stay readable until replaced
        assert!(cache.get(&"sales").unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_replaces_entry() {
        let cache: TtlCache<&str, u32> = TtlCache::default();
        cache.set("stats", 1).unwrap();
        let first = cache.get(&"stats").unwrap().unwrap();

        tokio::time::advance(Duration::from_secs(10)).await;
        cache.set("stats", 2).unwrap();
        let second = cache.get(&"stats").unwrap().unwrap();

        assert_eq!(*first.data, 1);
        assert_eq!(*second.data, 2);
        assert!(second.fetched_at > first.fetched_at);
        assert_eq!(second.ttl, DEFAULT_TTL);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_missing_key() {
        let cache: TtlCache<&str, u32> = TtlCache::default();
        assert!(cache.get(&"activity").unwrap().is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let cache: Arc<TtlCache<&str, u32>> = Arc::new(TtlCache::default());
        let poisoner = Arc::clone(&cache);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.entries.write().unwrap();
            panic!("poison the cache lock");
        })
        .join();

        assert!(matches!(cache.get(&"sales"), Err(CacheError::Poisoned)));
        assert!(matches!(cache.set("sales", 1), Err(CacheError::Poisoned)));
    }
}
