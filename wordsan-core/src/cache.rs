//! cache.rs - Region-keyed cache used by the sanitizer core.
//!
//! Two regions exist: `ReservedWords` holds the whole word list under
//! `ALL_WORDS_KEY`, `ReservedWordByValue` holds single records keyed by their
//! word text. Entries have no TTL and live until explicitly evicted.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::model::ReservedWord;

/// Key of the single entry in the `ReservedWords` region.
pub const ALL_WORDS_KEY: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheRegion {
    /// The complete reserved-word list.
    ReservedWords,
    /// Individual records keyed by word value.
    ReservedWordByValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheValue {
    Words(Vec<ReservedWord>),
    Word(ReservedWord),
}

/// Cache interface consumed by `SanitizerService`.
pub trait WordCache: Send + Sync {
    fn get(&self, region: CacheRegion, key: &str) -> Option<CacheValue>;
    fn put(&self, region: CacheRegion, key: &str, value: CacheValue);
    fn evict(&self, region: CacheRegion, key: &str);
    fn evict_all(&self, region: CacheRegion);
}

/// Point-in-time counters of an `InMemoryWordCache`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub puts: u64,
    pub evictions: u64,
}

/// Thread-safe cache held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryWordCache {
    regions: RwLock<HashMap<CacheRegion, HashMap<String, CacheValue>>>,
    hits: AtomicU64,
    misses: AtomicU64,
    puts: AtomicU64,
    evictions: AtomicU64,
}

impl InMemoryWordCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            puts: self.puts.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }

    /// Number of entries currently held in `region`.
    pub fn len(&self, region: CacheRegion) -> usize {
        self.regions
            .read()
            .map(|regions| regions.get(&region).map_or(0, HashMap::len))
            .unwrap_or(0)
    }

    pub fn contains(&self, region: CacheRegion, key: &str) -> bool {
        self.regions
            .read()
            .map(|regions| regions.get(&region).is_some_and(|entries| entries.contains_key(key)))
            .unwrap_or(false)
    }
}

impl WordCache for InMemoryWordCache {
    fn get(&self, region: CacheRegion, key: &str) -> Option<CacheValue> {
        let found = match self.regions.read() {
            Ok(regions) => regions.get(&region).and_then(|entries| entries.get(key)).cloned(),
            Err(_) => {
                warn!("Cache lock poisoned, treating lookup as a miss.");
                None
            }
        };
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Cache hit: {:?}/{}", region, key);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!("Cache miss: {:?}/{}", region, key);
        }
        found
    }

    fn put(&self, region: CacheRegion, key: &str, value: CacheValue) {
        match self.regions.write() {
            Ok(mut regions) => {
                regions.entry(region).or_default().insert(key.to_string(), value);
                self.puts.fetch_add(1, Ordering::Relaxed);
            }
            Err(_) => warn!("Cache lock poisoned, dropping put for {:?}/{}.", region, key),
        }
    }

    fn evict(&self, region: CacheRegion, key: &str) {
        match self.regions.write() {
            Ok(mut regions) => {
                if let Some(entries) = regions.get_mut(&region) {
                    if entries.remove(key).is_some() {
                        self.evictions.fetch_add(1, Ordering::Relaxed);
                        debug!("Evicted {:?}/{}", region, key);
                    }
                }
            }
            // A poisoned lock cannot be trusted to hold fresh data; drop everything.
            Err(poisoned) => {
                let mut regions = poisoned.into_inner();
                regions.clear();
                self.regions.clear_poison();
            }
        }
    }

    fn evict_all(&self, region: CacheRegion) {
        match self.regions.write() {
            Ok(mut regions) => {
                if let Some(entries) = regions.remove(&region) {
                    self.evictions.fetch_add(entries.len() as u64, Ordering::Relaxed);
                    debug!("Evicted all {} entries of {:?}", entries.len(), region);
                }
            }
            Err(poisoned) => {
                let mut regions = poisoned.into_inner();
                regions.clear();
                self.regions.clear_poison();
            }
        }
    }
}

/// Cache that stores nothing; every lookup misses.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopWordCache;

impl WordCache for NoopWordCache {
    fn get(&self, _region: CacheRegion, _key: &str) -> Option<CacheValue> {
        None
    }
    fn put(&self, _region: CacheRegion, _key: &str, _value: CacheValue) {}
    fn evict(&self, _region: CacheRegion, _key: &str) {}
    fn evict_all(&self, _region: CacheRegion) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_and_evict_by_key() {
        let cache = InMemoryWordCache::new();
        let select = ReservedWord::new(1, "SELECT");
        cache.put(CacheRegion::ReservedWordByValue, "SELECT", CacheValue::Word(select.clone()));

        assert_eq!(cache.get(CacheRegion::ReservedWordByValue, "SELECT"), Some(CacheValue::Word(select)));
        assert_eq!(cache.get(CacheRegion::ReservedWords, "SELECT"), None);

        cache.evict(CacheRegion::ReservedWordByValue, "SELECT");
        assert_eq!(cache.get(CacheRegion::ReservedWordByValue, "SELECT"), None);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 2, puts: 1, evictions: 1 });
    }

    #[test]
    fn evict_all_only_clears_one_region() {
        let cache = InMemoryWordCache::new();
        cache.put(CacheRegion::ReservedWords, ALL_WORDS_KEY, CacheValue::Words(vec![]));
        cache.put(CacheRegion::ReservedWordByValue, "A", CacheValue::Word(ReservedWord::new(1, "A")));
        cache.put(CacheRegion::ReservedWordByValue, "B", CacheValue::Word(ReservedWord::new(2, "B")));

        cache.evict_all(CacheRegion::ReservedWordByValue);
        assert_eq!(cache.len(CacheRegion::ReservedWordByValue), 0);
        assert!(cache.contains(CacheRegion::ReservedWords, ALL_WORDS_KEY));
    }

    #[test]
    fn noop_cache_never_hits() {
        let cache = NoopWordCache;
        cache.put(CacheRegion::ReservedWords, ALL_WORDS_KEY, CacheValue::Words(vec![]));
        assert_eq!(cache.get(CacheRegion::ReservedWords, ALL_WORDS_KEY), None);
    }
}
