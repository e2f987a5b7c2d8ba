//! masking.rs - The reserved-word masking pass.
//!
//! Each reserved word is compiled into a case-insensitive *literal* matcher
//! (the word is escaped, so regex metacharacters in it carry no meaning) and
//! applied to the working string in snapshot order. Every match is replaced by
//! a run of `*` as long as the word. Substitutions operate on the already
//! partially masked string; there is no re-scan and no overlap resolution.
//! The result is upper-cased once all words have been applied.
//!
//! Compiled matchers are kept in a shared, thread-safe cache keyed by the word
//! text so repeated `sanitize` calls do not recompile the dictionary.
//!
//! License: MIT OR APACHE 2.0

use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex, RegexBuilder};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Upper bound on cached matchers before the cache is flushed.
pub const MAX_COMPILED_MATCHERS: usize = 4096;

lazy_static! {
    /// Compiled literal matchers, keyed by the reserved word they match.
    static ref COMPILED_MATCHERS: RwLock<HashMap<String, Arc<Regex>>> = RwLock::new(HashMap::new());
}

/// Number of matches a single reserved word produced during one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaskSummaryItem {
    pub word: String,
    pub occurrences: usize,
}

/// Result of a masking pass: the final text and a per-word summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaskOutcome {
    pub masked: String,
    pub summary: Vec<MaskSummaryItem>,
}

/// Builds a case-insensitive matcher for `word` taken literally.
pub fn compile_literal(word: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(word))
        .case_insensitive(true)
        .size_limit(10 * (1 << 20))
        .build()
}

/// Gets a matcher from the shared cache or compiles it.
pub fn get_or_compile_literal(word: &str) -> Result<Arc<Regex>, regex::Error> {
    if let Ok(cache) = COMPILED_MATCHERS.read() {
        if let Some(regex) = cache.get(word) {
            return Ok(Arc::clone(regex));
        }
    }

    let compiled = Arc::new(compile_literal(word)?);

    // Poisoned: skip caching.
    if let Ok(mut cache) = COMPILED_MATCHERS.write() {
        if cache.len() >= MAX_COMPILED_MATCHERS {
            debug!("Matcher cache reached {} entries, flushing.", cache.len());
            cache.clear();
        }
        cache.insert(word.to_string(), Arc::clone(&compiled));
    }
    Ok(compiled)
}

/// Masks every case-insensitive occurrence of each word in `words`, in order,
/// then upper-cases the result.
///
/// Empty words are skipped. The mask length is the word's length in
/// characters.
pub fn mask_reserved_words<S: AsRef<str>>(input: &str, words: &[S]) -> Result<MaskOutcome, regex::Error> {
    let mut working = input.to_string();
    let mut summary = Vec::new();

    for word in words {
        let word = word.as_ref();
        if word.is_empty() {
            continue;
        }

        let matcher = get_or_compile_literal(word)?;
        let mask = "*".repeat(word.chars().count());
        let mut occurrences = 0usize;
        let replaced = matcher.replace_all(&working, |_: &Captures| {
            occurrences += 1;
            mask.as_str()
        });

        if occurrences > 0 {
            debug!("Reserved word '{}' masked {} time(s).", word, occurrences);
            working = replaced.into_owned();
            summary.push(MaskSummaryItem { word: word.to_string(), occurrences });
        }
    }

    Ok(MaskOutcome { masked: working.to_uppercase(), summary })
}
