// wordsan-core/tests/common/mod.rs
//! Store doubles shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use wordsan_core::{
    InMemoryWordCache, MemoryWordStore, ReservedWord, SanitizerService, StoreError, WordRecord, WordStore,
};

/// Wraps a `MemoryWordStore` and counts reads, so tests can tell cache hits from store hits.
#[derive(Debug, Default)]
pub struct CountingStore {
    inner: MemoryWordStore,
    pub find_all_calls: AtomicUsize,
    pub find_by_word_calls: AtomicUsize,
}

impl CountingStore {
    pub fn with_words(words: &[&str]) -> Self {
        Self {
            inner: MemoryWordStore::with_words(words.iter().copied()).unwrap(),
            ..Self::default()
        }
    }

    pub fn find_all_count(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }

    pub fn find_by_word_count(&self) -> usize {
        self.find_by_word_calls.load(Ordering::SeqCst)
    }
}

impl WordStore for CountingStore {
    fn find_all(&self) -> Result<Vec<ReservedWord>, StoreError> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_all()
    }
    fn find_by_id(&self, id: u64) -> Result<Option<ReservedWord>, StoreError> {
        self.inner.find_by_id(id)
    }
    fn find_by_word(&self, word: &str) -> Result<Option<ReservedWord>, StoreError> {
        self.find_by_word_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_word(word)
    }
    fn save(&self, record: WordRecord) -> Result<ReservedWord, StoreError> {
        self.inner.save(record)
    }
    fn delete(&self, record: &ReservedWord) -> Result<bool, StoreError> {
        self.inner.delete(record)
    }
    fn delete_by_id(&self, id: u64) -> Result<Option<ReservedWord>, StoreError> {
        self.inner.delete_by_id(id)
    }
}

/// A store whose backend is down: every call fails.
#[derive(Debug, Default)]
pub struct UnavailableStore;

impl WordStore for UnavailableStore {
    fn find_all(&self) -> Result<Vec<ReservedWord>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
    fn find_by_id(&self, _id: u64) -> Result<Option<ReservedWord>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
    fn find_by_word(&self, _word: &str) -> Result<Option<ReservedWord>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
    fn save(&self, _record: WordRecord) -> Result<ReservedWord, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
    fn delete(&self, _record: &ReservedWord) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
    fn delete_by_id(&self, _id: u64) -> Result<Option<ReservedWord>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

pub struct Harness {
    pub store: Arc<CountingStore>,
    pub cache: Arc<InMemoryWordCache>,
    pub service: SanitizerService,
}

pub fn harness(words: &[&str]) -> Harness {
    let store = Arc::new(CountingStore::with_words(words));
    let cache = Arc::new(InMemoryWordCache::new());
    let service = SanitizerService::new(store.clone(), cache.clone());
    Harness { store, cache, service }
}
