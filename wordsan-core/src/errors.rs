//! errors.rs - Error taxonomy for the wordsan-core library.
//!
//! Every fallible operation on `SanitizerService` reports exactly one of the
//! kinds defined here. Store-level failures are described separately by
//! `StoreError` and wrapped as the `source` of the internal-failure kinds.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

use crate::store::StoreError;

/// All errors surfaced by the sanitizer core.
#[derive(Error, Debug)]
pub enum WordSanitizerError {
    /// Malformed word or input text.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A word with the same value already exists.
    #[error("{0}")]
    DuplicateRecord(String),

    /// Lookup, update or delete target is missing.
    #[error("{0}")]
    RecordNotFound(String),

    /// The reserved-word snapshot (or another read) could not be obtained.
    #[error("{message}")]
    Sanitization {
        message: String,
        #[source]
        source: Option<StoreError>,
    },

    /// Persisting a record failed for a reason other than a uniqueness conflict.
    #[error("{message}")]
    EntitySave {
        message: String,
        #[source]
        source: Option<StoreError>,
    },
}

/// Fieldless discriminant of `WordSanitizerError`, convenient for transports
/// that map errors onto status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    DuplicateRecord,
    RecordNotFound,
    Sanitization,
    EntitySave,
}

impl WordSanitizerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WordSanitizerError::Validation(_) => ErrorKind::Validation,
            WordSanitizerError::DuplicateRecord(_) => ErrorKind::DuplicateRecord,
            WordSanitizerError::RecordNotFound(_) => ErrorKind::RecordNotFound,
            WordSanitizerError::Sanitization { .. } => ErrorKind::Sanitization,
            WordSanitizerError::EntitySave { .. } => ErrorKind::EntitySave,
        }
    }

    pub(crate) fn sanitization(message: impl Into<String>, source: StoreError) -> Self {
        WordSanitizerError::Sanitization { message: message.into(), source: Some(source) }
    }

    pub(crate) fn entity_save(message: impl Into<String>, source: StoreError) -> Self {
        WordSanitizerError::EntitySave { message: message.into(), source: Some(source) }
    }

    /// True for `Sanitization` and `EntitySave`.
    pub fn is_internal(&self) -> bool {
        matches!(self.kind(), ErrorKind::Sanitization | ErrorKind::EntitySave)
    }
}
