//! Word store: durable mapping from id to reserved word.
//!
//! The `WordStore` trait is the narrow persistence seam the sanitizer core
//! depends on. Implementations must make `find_all` an atomic snapshot and
//! `save` an atomic check-and-write with respect to word uniqueness.
//!
//! * `memory`: process-local store, used by tests and the `memory` config.
//! * `json_file`: the same semantics persisted to a JSON document.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

use crate::model::{ReservedWord, WordRecord};

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileWordStore;
pub use memory::MemoryWordStore;

/// Failures reported by a `WordStore`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unique constraint violated: word '{0}' already exists")]
    UniqueViolation(String),

    #[error("No record with id {0}")]
    NotFound(u64),

    #[error("Word store unavailable: {0}")]
    Unavailable(String),

    #[error("Word store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Word store document is malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistence interface consumed by `SanitizerService`.
pub trait WordStore: Send + Sync {
    /// Every record, in ascending id order, read atomically.
    fn find_all(&self) -> Result<Vec<ReservedWord>, StoreError>;

    fn find_by_id(&self, id: u64) -> Result<Option<ReservedWord>, StoreError>;

    /// Exact (case-sensitive) lookup by word value.
    fn find_by_word(&self, word: &str) -> Result<Option<ReservedWord>, StoreError>;

    /// Inserts (`record.id == None`) or rewrites an existing record.
    ///
    /// # Errors
    ///
    /// `StoreError::UniqueViolation` when another record already holds the word;
    /// `StoreError::NotFound` when updating an id that no longer exists.
    fn save(&self, record: WordRecord) -> Result<ReservedWord, StoreError>;

    /// Removes `record` if its id still holds the same word.
    ///
    /// Returns `false` when the record is gone or has been renamed since it was read.
    fn delete(&self, record: &ReservedWord) -> Result<bool, StoreError>;

    /// Removes and returns the record with `id`, if any.
    fn delete_by_id(&self, id: u64) -> Result<Option<ReservedWord>, StoreError>;
}
