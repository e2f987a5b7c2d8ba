//! In-process `WordStore` backed by an ordered map behind a `RwLock`.

use log::debug;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{StoreError, WordStore};
use crate::model::{ReservedWord, WordRecord};

/// The table itself. Shared with `JsonFileWordStore`, which persists it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct WordTable {
    pub(crate) records: BTreeMap<u64, String>,
    pub(crate) next_id: u64,
}

impl WordTable {
    pub(crate) fn new() -> Self {
        Self { records: BTreeMap::new(), next_id: 1 }
    }

    pub(crate) fn all(&self) -> Vec<ReservedWord> {
        self.records.iter().map(|(id, word)| ReservedWord::new(*id, word.clone())).collect()
    }

    pub(crate) fn by_id(&self, id: u64) -> Option<ReservedWord> {
        self.records.get(&id).map(|word| ReservedWord::new(id, word.clone()))
    }

    pub(crate) fn by_word(&self, word: &str) -> Option<ReservedWord> {
        self.records
            .iter()
            .find(|(_, existing)| existing.as_str() == word)
            .map(|(id, existing)| ReservedWord::new(*id, existing.clone()))
    }

    /// Check-and-write; the caller holds the write lock for the whole call.
    pub(crate) fn save(&mut self, record: WordRecord) -> Result<ReservedWord, StoreError> {
        if let Some(existing) = self.by_word(&record.word) {
            if Some(existing.id) != record.id {
                return Err(StoreError::UniqueViolation(record.word));
            }
        }

        match record.id {
            None => {
                let id = self.next_id;
                self.next_id += 1;
                self.records.insert(id, record.word.clone());
                debug!("Inserted word #{}.", id);
                Ok(ReservedWord::new(id, record.word))
            }
            Some(id) => {
                let slot = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
                *slot = record.word.clone();
                debug!("Updated word #{}.", id);
                Ok(ReservedWord::new(id, record.word))
            }
        }
    }

    pub(crate) fn remove(&mut self, id: u64) -> Option<ReservedWord> {
        self.records.remove(&id).map(|word| ReservedWord::new(id, word))
    }

    /// Removes `record` only while its id still holds the same word.
    pub(crate) fn remove_record(&mut self, record: &ReservedWord) -> bool {
        if self.records.get(&record.id) == Some(&record.word) {
            self.records.remove(&record.id);
            true
        } else {
            false
        }
    }
}

/// Thread-safe in-memory store. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct MemoryWordStore {
    table: RwLock<WordTable>,
}

impl Default for MemoryWordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryWordStore {
    pub fn new() -> Self {
        Self { table: RwLock::new(WordTable::new()) }
    }

    /// Builds a store pre-populated with `words`, in order. Duplicates are rejected.
    pub fn with_words<I, S>(words: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = WordTable::new();
        for word in words {
            table.save(WordRecord::new_word(word))?;
        }
        Ok(Self { table: RwLock::new(table) })
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, WordTable>, StoreError> {
        self.table
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, WordTable>, StoreError> {
        self.table
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl WordStore for MemoryWordStore {
    fn find_all(&self) -> Result<Vec<ReservedWord>, StoreError> {
        Ok(self.read()?.all())
    }

    fn find_by_id(&self, id: u64) -> Result<Option<ReservedWord>, StoreError> {
        Ok(self.read()?.by_id(id))
    }

    fn find_by_word(&self, word: &str) -> Result<Option<ReservedWord>, StoreError> {
        Ok(self.read()?.by_word(word))
    }

    fn save(&self, record: WordRecord) -> Result<ReservedWord, StoreError> {
        self.write()?.save(record)
    }

    fn delete(&self, record: &ReservedWord) -> Result<bool, StoreError> {
        Ok(self.write()?.remove_record(record))
    }

    fn delete_by_id(&self, id: u64) -> Result<Option<ReservedWord>, StoreError> {
        Ok(self.write()?.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_increasing_ids_and_never_reuses_them() {
        let store = MemoryWordStore::new();
        let select = store.save(WordRecord::new_word("SELECT")).unwrap();
        let drop = store.save(WordRecord::new_word("DROP")).unwrap();
        assert_eq!((select.id, drop.id), (1, 2));

        store.delete_by_id(drop.id).unwrap();
        let update = store.save(WordRecord::new_word("UPDATE")).unwrap();
        assert_eq!(update.id, 3);
    }

    #[test]
    fn save_rejects_duplicate_words() {
        let store = MemoryWordStore::with_words(["SELECT"]).unwrap();
        let err = store.save(WordRecord::new_word("SELECT")).unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(word) if word == "SELECT"));
        // Uniqueness is case-sensitive at storage level.
        assert!(store.save(WordRecord::new_word("select")).is_ok());
    }

    #[test]
    fn update_keeps_id_and_checks_collisions() {
        let store = MemoryWordStore::with_words(["SELECT", "UPDATE"]).unwrap();
        let renamed = store.save(WordRecord { id: Some(1), word: "INSERT".to_string() }).unwrap();
        assert_eq!(renamed, ReservedWord::new(1, "INSERT"));

        let err = store.save(WordRecord { id: Some(1), word: "UPDATE".to_string() }).unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));
        assert_eq!(store.find_by_id(1).unwrap().unwrap().word, "INSERT");

        // Saving a record under its own value is not a collision.
        assert!(store.save(WordRecord { id: Some(2), word: "UPDATE".to_string() }).is_ok());
    }

    #[test]
    fn update_of_vanished_id_is_not_found() {
        let store = MemoryWordStore::new();
        let err = store.save(WordRecord { id: Some(42), word: "X".to_string() }).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(42)));
    }

    #[test]
    fn delete_ignores_a_record_renamed_since_it_was_read() {
        let store = MemoryWordStore::with_words(["SELECT"]).unwrap();
        let stale = store.find_by_word("SELECT").unwrap().unwrap();
        store.save(WordRecord { id: Some(stale.id), word: "INSERT".to_string() }).unwrap();

        assert!(!store.delete(&stale).unwrap());
        assert_eq!(store.find_by_id(1).unwrap().unwrap().word, "INSERT");
        assert!(store.delete(&ReservedWord::new(1, "INSERT")).unwrap());
        assert!(store.find_all().unwrap().is_empty());
    }

    #[test]
    fn find_all_returns_id_order() {
        let store = MemoryWordStore::with_words(["B", "A", "C"]).unwrap();
        let words: Vec<String> = store.find_all().unwrap().into_iter().map(|w| w.word).collect();
        assert_eq!(words, ["B", "A", "C"]);
    }
}
