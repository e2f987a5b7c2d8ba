//! Data model for reserved words.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single sanitization target.
///
/// `id` is assigned by the store on first save and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ReservedWord {
    pub id: u64,
    pub word: String,
}

impl ReservedWord {
    pub fn new(id: u64, word: impl Into<String>) -> Self {
        Self { id, word: word.into() }
    }
}

impl fmt::Display for ReservedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.word)
    }
}

/// A record handed to `WordStore::save`.
///
/// `id: None` inserts a new record; `Some(id)` rewrites the word of an
/// existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRecord {
    pub id: Option<u64>,
    pub word: String,
}

impl WordRecord {
    pub fn new_word(word: impl Into<String>) -> Self {
        Self { id: None, word: word.into() }
    }
}

impl From<ReservedWord> for WordRecord {
    fn from(value: ReservedWord) -> Self {
        Self { id: Some(value.id), word: value.word }
    }
}
