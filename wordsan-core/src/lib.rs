// wordsan-core/src/lib.rs
//! # wordsan Core Library
//!
//! `wordsan-core` maintains a mutable set of reserved (sensitive) words and
//! masks every case-insensitive occurrence of them in arbitrary text, replacing
//! each match with asterisks of the same length and upper-casing the result.
//!
//! ## Modules
//!
//! * `model`: `ReservedWord` and the `WordRecord` handed to stores.
//! * `validators`: format checks for words and sanitizer input.
//! * `errors`: the closed `WordSanitizerError` taxonomy.
//! * `masking`: the literal, case-insensitive masking pass.
//! * `store`: the `WordStore` seam with in-memory and JSON-file backends.
//! * `cache`: the region-keyed `WordCache` seam and its implementations.
//! * `service`: `SanitizerService`, which orchestrates all of the above.
//! * `config`: YAML configuration and the embedded default word list.
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wordsan_core::{InMemoryWordCache, MemoryWordStore, SanitizerService};
//!
//! let store = Arc::new(MemoryWordStore::new());
//! let service = SanitizerService::new(store, Arc::new(InMemoryWordCache::new()));
//!
//! service.add_word("SELECT").unwrap();
//! service.add_word("DROP").unwrap();
//!
//! let masked = service.sanitize("select * from users; drop table x").unwrap();
//! assert_eq!(masked, "****** * FROM USERS; **** TABLE X");
//! ```
//!
//! ## Error Handling
//!
//! Service operations return `WordSanitizerError`; configuration loading uses
//! `anyhow::Error` with context.
//!
//! License: MIT OR Apache-2.0

pub mod cache;
pub mod config;
pub mod errors;
pub mod masking;
pub mod model;
pub mod service;
pub mod store;
pub mod validators;

pub use cache::{CacheRegion, CacheStats, CacheValue, InMemoryWordCache, NoopWordCache, WordCache, ALL_WORDS_KEY};
pub use config::{load_default_words, CacheConfig, SanitizerConfig, StoreConfig, StoreKind};
pub use errors::{ErrorKind, WordSanitizerError};
pub use masking::{mask_reserved_words, MaskOutcome, MaskSummaryItem};
pub use model::{ReservedWord, WordRecord};
pub use service::SanitizerService;
pub use store::{JsonFileWordStore, MemoryWordStore, StoreError, WordStore};
pub use validators::{is_valid_word, validate_input, validate_word, MAX_WORD_LENGTH};
