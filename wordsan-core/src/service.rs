//! service.rs - The sanitizer core.
//!
//! `SanitizerService` ties a `WordStore` and a `WordCache` together and
//! exposes `sanitize` plus the reserved-word CRUD operations.
//!
//! Ordering rules:
//!
//! * Mutations hold the write side of `write_gate` for *store write, then
//!   cache evict/put*. This also turns `update_word`'s existence checks and
//!   its write into one atomic unit.
//! * A read that populates the cache after a miss holds the read side of the
//!   gate for *store read, then cache put*, so it can never re-insert data a
//!   concurrent mutation has already invalidated.
//! * Masking itself runs without holding any lock.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, info};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::cache::{CacheRegion, CacheValue, WordCache, ALL_WORDS_KEY};
use crate::errors::WordSanitizerError;
use crate::masking::{mask_reserved_words, MaskOutcome};
use crate::model::{ReservedWord, WordRecord};
use crate::store::{StoreError, WordStore};
use crate::validators::validate_word;

pub type Result<T> = std::result::Result<T, WordSanitizerError>;

pub struct SanitizerService {
    store: Arc<dyn WordStore>,
    cache: Arc<dyn WordCache>,
    write_gate: RwLock<()>,
}

impl std::fmt::Debug for SanitizerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SanitizerService").finish_non_exhaustive()
    }
}

impl SanitizerService {
    pub fn new(store: Arc<dyn WordStore>, cache: Arc<dyn WordCache>) -> Self {
        Self { store, cache, write_gate: RwLock::new(()) }
    }

    fn read_gate(&self) -> Result<RwLockReadGuard<'_, ()>> {
        self.write_gate.read().map_err(|_| WordSanitizerError::Sanitization {
            message: "Sanitizer write gate poisoned".to_string(),
            source: None,
        })
    }

    fn lock_writes(&self) -> Result<RwLockWriteGuard<'_, ()>> {
        self.write_gate.write().map_err(|_| WordSanitizerError::EntitySave {
            message: "Sanitizer write gate poisoned".to_string(),
            source: None,
        })
    }

    /// One consistent read of the full word list, served from the list region when cached.
    fn snapshot(&self) -> Result<Vec<ReservedWord>> {
        if let Some(CacheValue::Words(words)) = self.cache.get(CacheRegion::ReservedWords, ALL_WORDS_KEY) {
            return Ok(words);
        }

        let _gate = self.read_gate()?;
        let words = self.store.find_all().map_err(|e| {
            WordSanitizerError::sanitization("Unexpected error while fetching sensitive words", e)
        })?;
        if !words.is_empty() {
            self.cache.put(CacheRegion::ReservedWords, ALL_WORDS_KEY, CacheValue::Words(words.clone()));
        }
        Ok(words)
    }

    /// Masks every reserved word found in `input` and upper-cases the result.
    ///
    /// # Errors
    ///
    /// `Sanitization` when the reserved-word snapshot cannot be read.
    pub fn sanitize(&self, input: &str) -> Result<String> {
        self.sanitize_report(input).map(|outcome| outcome.masked)
    }

    /// Like `sanitize`, but also reports how often each reserved word matched.
    pub fn sanitize_report(&self, input: &str) -> Result<MaskOutcome> {
        info!("Sanitizing input of {} characters.", input.chars().count());
        let words = self.snapshot()?;
        let terms: Vec<&str> = words.iter().map(|w| w.word.as_str()).collect();

        let outcome = mask_reserved_words(input, &terms).map_err(|e| WordSanitizerError::Sanitization {
            message: format!("Failed to compile reserved-word matcher: {}", e),
            source: None,
        })?;
        debug!("Sanitized output: {}", outcome.masked);
        Ok(outcome)
    }

    /// Every reserved word, in store order.
    ///
    /// # Errors
    ///
    /// `RecordNotFound` when no words exist.
    pub fn list_all(&self) -> Result<Vec<ReservedWord>> {
        info!("Finding all words in the table");
        let words = self.snapshot()?;
        if words.is_empty() {
            return Err(WordSanitizerError::RecordNotFound(
                "No reserved words found in the database. Table is empty".to_string(),
            ));
        }
        Ok(words)
    }

    /// Stores a new reserved word and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed word, `DuplicateRecord` when the word is
    /// already stored, `EntitySave` when the store fails otherwise.
    pub fn add_word(&self, word: &str) -> Result<ReservedWord> {
        info!("Attempting to add a new word {}", word);
        validate_word(word)?;

        let _gate = self.lock_writes()?;
        let saved = self.store.save(WordRecord::new_word(word)).map_err(|e| match e {
            StoreError::UniqueViolation(_) => {
                WordSanitizerError::DuplicateRecord(format!("The input '{}' already exists.", word))
            }
            other => WordSanitizerError::entity_save(format!("Failed to save the input '{}'.", word), other),
        })?;

        self.cache.evict_all(CacheRegion::ReservedWords);
        self.cache.put(CacheRegion::ReservedWordByValue, &saved.word, CacheValue::Word(saved.clone()));
        Ok(saved)
    }

    /// Exact-case lookup by value, served from the by-value cache region when possible.
    ///
    /// # Errors
    ///
    /// `RecordNotFound` when no record holds `word`; `Sanitization` when the store fails.
    pub fn find_by_word(&self, word: &str) -> Result<ReservedWord> {
        info!("Finding reserved word by value {}", word);
        if let Some(CacheValue::Word(found)) = self.cache.get(CacheRegion::ReservedWordByValue, word) {
            return Ok(found);
        }

        let _gate = self.read_gate()?;
        let found = self
            .store
            .find_by_word(word)
            .map_err(|e| WordSanitizerError::sanitization(format!("Failed to look up the input '{}'", word), e))?
            .ok_or_else(|| WordSanitizerError::RecordNotFound(format!("The input '{}' does not exist", word)))?;

        self.cache.put(CacheRegion::ReservedWordByValue, word, CacheValue::Word(found.clone()));
        Ok(found)
    }

    /// # Errors
    ///
    /// `RecordNotFound` when `id` is unknown; `Sanitization` when the store fails.
    pub fn find_by_id(&self, id: u64) -> Result<ReservedWord> {
        info!("Finding reserved word by id {}", id);
        self.store
            .find_by_id(id)
            .map_err(|e| WordSanitizerError::sanitization(format!("Failed to look up id {}", id), e))?
            .ok_or_else(|| WordSanitizerError::RecordNotFound(format!("The id {} does not exist", id)))
    }

    /// Renames `old_word` to `new_word`, keeping the record's id.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed `new_word`, `RecordNotFound` when
    /// `old_word` is missing, `DuplicateRecord` when `new_word` belongs to
    /// another record. On error the store is left unchanged.
    pub fn update_word(&self, old_word: &str, new_word: &str) -> Result<ReservedWord> {
        info!("Update word {} with new word {}", old_word, new_word);
        validate_word(new_word)?;

        let _gate = self.lock_writes()?;
        let existing = self
            .store
            .find_by_word(old_word)
            .map_err(|e| WordSanitizerError::entity_save(format!("Failed to look up the input '{}'", old_word), e))?
            .ok_or_else(|| {
                WordSanitizerError::RecordNotFound(format!("The old input '{}' does not exist", old_word))
            })?;

        if old_word == new_word {
            debug!("Update of '{}' to itself is a no-op.", old_word);
            return Ok(existing);
        }

        let clash = self
            .store
            .find_by_word(new_word)
            .map_err(|e| WordSanitizerError::entity_save(format!("Failed to look up the input '{}'", new_word), e))?;
        if clash.is_some_and(|other| other.id != existing.id) {
            return Err(WordSanitizerError::DuplicateRecord(format!(
                "The input to be added '{}' already exists.",
                new_word
            )));
        }

        let record = WordRecord { id: Some(existing.id), word: new_word.to_string() };
        let saved = self.store.save(record).map_err(|e| match e {
            StoreError::UniqueViolation(_) => WordSanitizerError::DuplicateRecord(format!(
                "The input to be added '{}' already exists.",
                new_word
            )),
            StoreError::NotFound(_) => {
                WordSanitizerError::RecordNotFound(format!("The old input '{}' does not exist", old_word))
            }
            other => WordSanitizerError::entity_save(format!("Failed to update the input '{}'.", old_word), other),
        })?;

        self.cache.evict_all(CacheRegion::ReservedWords);
        self.cache.evict(CacheRegion::ReservedWordByValue, old_word);
        self.cache.put(CacheRegion::ReservedWordByValue, &saved.word, CacheValue::Word(saved.clone()));
        Ok(saved)
    }

    /// Deletes the record with `id` and returns it.
    ///
    /// # Errors
    ///
    /// `RecordNotFound` when `id` is unknown; `EntitySave` when the store fails.
    pub fn delete_word_by_id(&self, id: u64) -> Result<ReservedWord> {
        info!("Deleting word by id {}", id);
        let _gate = self.lock_writes()?;
        let removed = self
            .store
            .delete_by_id(id)
            .map_err(|e| WordSanitizerError::entity_save(format!("Failed to delete id {}", id), e))?
            .ok_or_else(|| WordSanitizerError::RecordNotFound(format!("The id {} does not exist", id)))?;

        self.cache.evict_all(CacheRegion::ReservedWords);
        self.cache.evict(CacheRegion::ReservedWordByValue, &removed.word);
        Ok(removed)
    }

    /// Deletes the record holding `word` and returns it.
    ///
    /// # Errors
    ///
    /// `RecordNotFound` when no record holds `word`, including one renamed by
    /// another handle on the same store mid-call; `EntitySave` when the store fails.
    pub fn delete_word_by_value(&self, word: &str) -> Result<ReservedWord> {
        info!("Deleting word by value {}", word);
        let _gate = self.lock_writes()?;
        let existing = self
            .store
            .find_by_word(word)
            .map_err(|e| WordSanitizerError::entity_save(format!("Failed to look up the word {}", word), e))?
            .ok_or_else(|| WordSanitizerError::RecordNotFound(format!("The word {} does not exist", word)))?;

        let removed = self
            .store
            .delete(&existing)
            .map_err(|e| WordSanitizerError::entity_save(format!("Failed to delete the word {}", word), e))?;
        if !removed {
            return Err(WordSanitizerError::RecordNotFound(format!("The word {} does not exist", word)));
        }

        self.cache.evict_all(CacheRegion::ReservedWords);
        self.cache.evict(CacheRegion::ReservedWordByValue, word);
        Ok(existing)
    }

    /// Adds each word that is not stored yet. Returns how many were inserted.
    pub fn seed_words<I, S>(&self, words: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut inserted = 0;
        for word in words {
            match self.add_word(word.as_ref()) {
                Ok(_) => inserted += 1,
                Err(WordSanitizerError::DuplicateRecord(_)) => {
                    debug!("Seed word '{}' already present, skipping.", word.as_ref());
                }
                Err(e) => return Err(e),
            }
        }
        info!("Seeded {} reserved word(s).", inserted);
        Ok(inserted)
    }
}
