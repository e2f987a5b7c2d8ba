//! Configuration management for `wordsan-core`.
//!
//! Defines the YAML-backed `SanitizerConfig` (store backend, cache toggle,
//! seed words) and the embedded default word list, and wires a
//! `SanitizerService` from a loaded configuration.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::{InMemoryWordCache, NoopWordCache, WordCache};
use crate::service::SanitizerService;
use crate::store::{JsonFileWordStore, MemoryWordStore, WordStore};
use crate::validators::validate_word;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    #[default]
    Memory,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub kind: StoreKind,
    /// Location of the JSON document; required for `kind: json`.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Top-level configuration for the sanitizer core.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SanitizerConfig {
    pub store: StoreConfig,
    pub cache: CacheConfig,
    /// Seed the embedded default words into a newly created store.
    pub seed_defaults: bool,
    /// Extra words added when the store is created (duplicates are skipped).
    pub words: Vec<String>,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            cache: CacheConfig::default(),
            seed_defaults: true,
            words: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WordList {
    words: Vec<String>,
}

/// Loads the embedded default reserved-word list.
pub fn load_default_words() -> Result<Vec<String>> {
    debug!("Loading default words from embedded string...");
    let default_yaml = include_str!("../config/default_words.yaml");
    let list: WordList = serde_yml::from_str(default_yaml).context("Failed to parse default words")?;
    debug!("Loaded {} default words.", list.words.len());
    Ok(list.words)
}

impl SanitizerConfig {
    /// Loads and validates a configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading sanitizer config from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: SanitizerConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// A config for a JSON store at `path`, everything else default.
    pub fn json_store(path: impl Into<PathBuf>) -> Self {
        Self {
            store: StoreConfig { kind: StoreKind::Json, path: Some(path.into()) },
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.store.kind == StoreKind::Json && self.store.path.is_none() {
            errors.push("`store.path` is required when `store.kind` is `json`.".to_string());
        }

        let mut seen = HashSet::new();
        for word in &self.words {
            if let Err(e) = validate_word(word) {
                errors.push(format!("Word '{}': {}", word, e));
            } else if !seen.insert(word.as_str()) {
                errors.push(format!("Duplicate word found: '{}'.", word));
            }
        }

        if !errors.is_empty() {
            Err(anyhow!("Config validation failed:\n{}", errors.join("\n")))
        } else {
            Ok(())
        }
    }

    /// Builds the store and cache described by this config, seeding the store
    /// only when it did not exist before.
    pub fn build_service(&self) -> Result<SanitizerService> {
        self.validate()?;

        // Bootstrap seeding runs only for a newly created store.
        let (store, fresh): (Arc<dyn WordStore>, bool) = match self.store.kind {
            StoreKind::Memory => (Arc::new(MemoryWordStore::new()), true),
            StoreKind::Json => {
                let path = self.store.path.as_ref().ok_or_else(|| anyhow!("`store.path` is missing"))?;
                let store = JsonFileWordStore::open(path)
                    .with_context(|| format!("Failed to open word store {}", path.display()))?;
                let fresh = store.was_created();
                (Arc::new(store), fresh)
            }
        };
        let cache: Arc<dyn WordCache> = if self.cache.enabled {
            Arc::new(InMemoryWordCache::new())
        } else {
            Arc::new(NoopWordCache)
        };

        let service = SanitizerService::new(store, cache);
        if !fresh {
            debug!("Existing word store, skipping bootstrap seeding.");
            return Ok(service);
        }

        if self.seed_defaults {
            service.seed_words(load_default_words()?).context("Failed to seed default words")?;
        }
        if !self.words.is_empty() {
            service.seed_words(&self.words).context("Failed to seed configured words")?;
        }
        Ok(service)
    }
}
