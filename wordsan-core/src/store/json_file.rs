//! `WordStore` persisted as a JSON document.
//!
//! The document on disk is the only copy of the table. Every operation takes
//! an `fs2` lock on a sibling lock file (`<store>.lock`) and reads the
//! document under it: shared for lookups, exclusive for mutations. A mutation
//! re-reads, applies its change to the fresh table, and rewrites the document
//! through a temporary file renamed over the target before releasing the
//! lock. Any number of handles, in one process or many, therefore see one
//! consistent table and one id sequence.
//!
//! The document records `next_id` so identifiers are never reused, even
//! across restarts.

use chrono::{DateTime, Utc};
use fs2::FileExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use super::memory::WordTable;
use super::{StoreError, WordStore};
use crate::model::{ReservedWord, WordRecord};

const STORE_FILE_TMP_SUFFIX: &str = ".tmp";
const STORE_FILE_LOCK_SUFFIX: &str = ".lock";

#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    next_id: u64,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    words: Vec<ReservedWord>,
}

/// Held `fs2` lock on the store's lock file; released on drop.
struct StoreLock {
    file: File,
}

impl StoreLock {
    fn acquire(lock_path: &Path, exclusive: bool) -> Result<Self, StoreError> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(lock_path)?;
        if exclusive {
            FileExt::lock_exclusive(&file)?;
        } else {
            FileExt::lock_shared(&file)?;
        }
        Ok(Self { file })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!("Failed to release word store lock: {}", e);
        }
    }
}

#[derive(Debug)]
pub struct JsonFileWordStore {
    path: PathBuf,
    lock_path: PathBuf,
    created: bool,
}

impl JsonFileWordStore {
    /// Opens the store at `path`, writing an empty document when the file does not exist yet.
    ///
    /// # Errors
    ///
    /// `StoreError::Serialization` for a malformed document,
    /// `StoreError::Unavailable` for one holding duplicate entries, and
    /// `StoreError::Io` when the file or its lock cannot be accessed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let lock_path = sibling_path(&path, STORE_FILE_LOCK_SUFFIX);

        let _lock = StoreLock::acquire(&lock_path, true)?;
        let created = !path.exists();
        let table = if created {
            let table = WordTable::new();
            save_table(&path, &table)?;
            table
        } else {
            load_table(&path)?
        };
        info!(
            "Opened word store at {} ({} words{}).",
            path.display(),
            table.records.len(),
            if created { ", new" } else { "" }
        );
        Ok(Self { path, lock_path, created })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when `open` created the document rather than finding an existing one.
    pub fn was_created(&self) -> bool {
        self.created
    }

    fn read<T>(&self, view: impl FnOnce(&WordTable) -> T) -> Result<T, StoreError> {
        let _lock = StoreLock::acquire(&self.lock_path, false)?;
        let table = load_table(&self.path)?;
        Ok(view(&table))
    }

    /// Re-reads the document, applies `change`, and persists the result, all under the exclusive lock.
    fn mutate<T>(&self, change: impl FnOnce(&mut WordTable) -> Result<T, StoreError>) -> Result<T, StoreError> {
        let _lock = StoreLock::acquire(&self.lock_path, true)?;
        let current = load_table(&self.path)?;
        let mut next = current.clone();
        let out = change(&mut next)?;
        if next != current {
            save_table(&self.path, &next)?;
        }
        Ok(out)
    }
}

impl WordStore for JsonFileWordStore {
    fn find_all(&self) -> Result<Vec<ReservedWord>, StoreError> {
        self.read(WordTable::all)
    }

    fn find_by_id(&self, id: u64) -> Result<Option<ReservedWord>, StoreError> {
        self.read(|table| table.by_id(id))
    }

    fn find_by_word(&self, word: &str) -> Result<Option<ReservedWord>, StoreError> {
        self.read(|table| table.by_word(word))
    }

    fn save(&self, record: WordRecord) -> Result<ReservedWord, StoreError> {
        self.mutate(|table| table.save(record))
    }

    fn delete(&self, record: &ReservedWord) -> Result<bool, StoreError> {
        self.mutate(|table| Ok(table.remove_record(record)))
    }

    fn delete_by_id(&self, id: u64) -> Result<Option<ReservedWord>, StoreError> {
        self.mutate(|table| Ok(table.remove(id)))
    }
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Reads the document; the caller holds the store lock.
fn load_table(path: &Path) -> Result<WordTable, StoreError> {
    if !path.exists() {
        warn!("Word store {} has disappeared, treating it as empty.", path.display());
        return Ok(WordTable::new());
    }

    let mut raw = Vec::new();
    File::open(path)?.read_to_end(&mut raw)?;

    if raw.iter().all(u8::is_ascii_whitespace) {
        warn!("Word store {} is empty, starting with an empty table.", path.display());
        return Ok(WordTable::new());
    }

    let document: StoreDocument = serde_json::from_slice(&raw)?;
    let mut table = WordTable::new();
    for record in document.words {
        if table.by_word(&record.word).is_some() || table.records.contains_key(&record.id) {
            return Err(StoreError::Unavailable(format!(
                "word store {} contains a duplicate entry for '{}'",
                path.display(),
                record.word
            )));
        }
        table.records.insert(record.id, record.word);
    }
    let max_id = table.records.keys().next_back().copied().unwrap_or(0);
    table.next_id = document.next_id.max(max_id + 1);
    Ok(table)
}

/// Rewrites the document through a temporary file; the caller holds the exclusive store lock.
fn save_table(path: &Path, table: &WordTable) -> Result<(), StoreError> {
    let document = StoreDocument {
        next_id: table.next_id,
        updated_at: Some(Utc::now()),
        words: table.all(),
    };
    let json = serde_json::to_vec_pretty(&document)?;

    let tmp_path = sibling_path(path, STORE_FILE_TMP_SUFFIX);
    {
        let mut tmp = OpenOptions::new().create(true).write(true).truncate(true).open(&tmp_path)?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.sync_all()?;
    }

    fs::rename(&tmp_path, path)?;
    debug!("Persisted {} words to {}.", table.records.len(), path.display());
    Ok(())
}
