//! Fortune Result Cache
//!
//! LRU cache for parsed fortune entries keyed by request fingerprint.
//! Entries expire a fixed time after they were written.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::constants::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL_SECS};
use crate::types::FortuneEntry;

/// Fortune result cache with TTL expiry and LRU eviction
pub struct ResultCache {
    cache: RwLock<HashMap<String, CachedResult>>,
    max_entries: usize,
    ttl: Duration,
    stats: RwLock<CacheStats>,
}

/// Cached result entry
struct CachedResult {
    entries: Vec<FortuneEntry>,
    inserted_at: Instant,
    last_accessed: Instant,
}

/// Cache statistics
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
}

impl CacheStats {
    /// Cache hit rate (0.0 - 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, Duration::from_secs(DEFAULT_TTL_SECS))
    }
}

impl ResultCache {
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
            max_entries: max_entries.max(1),
            ttl,
            stats: RwLock::new(CacheStats::default()),
        }
    }

    /// Look up a fingerprint, dropping the entry if it has expired
    pub fn get(&self, key: &str) -> Option<Vec<FortuneEntry>> {
        let Ok(mut cache) = self.cache.write() else {
            return None;
        };

        let expired = match cache.get_mut(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                entry.last_accessed = Instant::now();
                let entries = entry.entries.clone();
                self.record(|s| s.hits += 1);
                return Some(entries);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            cache.remove(key);
            debug!("Cached fortune expired: {}", key);
            self.record(|s| s.expirations += 1);
        }
        self.record(|s| s.misses += 1);
        None
    }

    /// Store entries under a fingerprint, evicting the least recently used
    /// entry when full
    pub fn insert(&self, key: impl Into<String>, entries: Vec<FortuneEntry>) {
        let Ok(mut cache) = self.cache.write() else {
            return;
        };
        let key = key.into();

        if !cache.contains_key(&key) && cache.len() >= self.max_entries {
            self.purge_expired(&mut cache);
            if cache.len() >= self.max_entries {
                self.evict_oldest(&mut cache);
            }
        }

        let now = Instant::now();
        cache.insert(
            key,
            CachedResult {
                entries,
                inserted_at: now,
                last_accessed: now,
            },
        );
    }

    fn purge_expired(&self, cache: &mut HashMap<String, CachedResult>) {
        let before = cache.len();
        cache.retain(|_, v| v.inserted_at.elapsed() < self.ttl);
        let removed = (before - cache.len()) as u64;
        if removed > 0 {
            self.record(|s| s.expirations += removed);
        }
    }

    /// Evict oldest entry (LRU)
    fn evict_oldest(&self, cache: &mut HashMap<String, CachedResult>) {
        if let Some(oldest_key) = cache
            .iter()
            .min_by_key(|(_, v)| v.last_accessed)
            .map(|(k, _)| k.clone())
        {
            cache.remove(&oldest_key);
            self.record(|s| s.evictions += 1);
        }
    }

    fn record(&self, update: impl FnOnce(&mut CacheStats)) {
        if let Ok(mut stats) = self.stats.write() {
            update(&mut stats);
        }
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.read().map(|s| *s).unwrap_or_default()
    }

    /// Current number of cached entries, including expired ones not yet purged
    pub fn len(&self) -> usize {
        self.cache.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FortuneType, PeriodValue};

    fn entries(text: &str) -> Vec<FortuneEntry> {
        vec![FortuneEntry::new(
            FortuneType::Overall,
            PeriodValue::Year,
            text,
        )]
    }

    #[test]
    fn test_cache_hit() {
        let cache = ResultCache::default();

        assert!(cache.get("a").is_none());
        cache.insert("a", entries("one"));
        assert_eq!(cache.get("a"), Some(entries("one")));

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_entries_expire_after_write() {
        let cache = ResultCache::new(10, Duration::from_millis(20));
        cache.insert("a", entries("one"));

        std::thread::sleep(Duration::from_millis(40));

        assert!(cache.get("a").is_none());
        assert!(cache.is_empty());
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_lru_eviction() {
        let cache = ResultCache::new(2, Duration::from_secs(60));

        cache.insert("a", entries("a"));
        std::thread::sleep(Duration::from_millis(2));
        cache.insert("b", entries("b"));
        std::thread::sleep(Duration::from_millis(2));

        // Touch "a" so "b" becomes least recently used
        assert!(cache.get("a").is_some());
        std::thread::sleep(Duration::from_millis(2));
        cache.insert("c", entries("c"));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 1);
        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_overwrite_does_not_evict() {
        let cache = ResultCache::new(1, Duration::from_secs(60));
        cache.insert("a", entries("one"));
        cache.insert("a", entries("two"));

        assert_eq!(cache.get("a"), Some(entries("two")));
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_clear() {
        let cache = ResultCache::default();
        cache.insert("a", entries("one"));
        cache.clear();
        assert!(cache.is_empty());
    }
}
