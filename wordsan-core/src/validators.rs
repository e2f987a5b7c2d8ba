// File: wordsan-core/src/validators.rs
//! Format validation for reserved words and sanitizer input.
//!
//! A valid word starts with an ASCII letter or underscore; the remaining
//! characters may be letters, digits, underscores, spaces or asterisks.
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::WordSanitizerError;

/// Maximum number of characters accepted for a single reserved word.
pub const MAX_WORD_LENGTH: usize = 255;

/// Pattern shared by reserved words and sanitizer input.
pub const WORD_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_ *]*$";

static WORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(WORD_PATTERN).expect("WORD_PATTERN is a valid regex")
});

/// Returns `true` when `text` is non-blank and matches `WORD_PATTERN`.
pub fn is_valid_word(text: &str) -> bool {
    !text.trim().is_empty() && WORD_REGEX.is_match(text)
}

/// Validates a word about to be stored.
///
/// # Errors
///
/// `WordSanitizerError::Validation` when the word is blank, too long, or
/// contains characters outside the allowed alphabet.
pub fn validate_word(word: &str) -> Result<(), WordSanitizerError> {
    if word.trim().is_empty() {
        return Err(WordSanitizerError::Validation("Word cannot be empty".to_string()));
    }
    let length = word.chars().count();
    if length > MAX_WORD_LENGTH {
        return Err(WordSanitizerError::Validation(format!(
            "Word length ({}) exceeds maximum allowed ({})",
            length, MAX_WORD_LENGTH
        )));
    }
    if !WORD_REGEX.is_match(word) {
        return Err(WordSanitizerError::Validation(
            "Input must start with a letter or underscore, and may only contain letters, digits, underscores, spaces, or asterisks".to_string(),
        ));
    }
    Ok(())
}

/// Validates text submitted for sanitization. Same alphabet as words, no length cap.
pub fn validate_input(input: &str) -> Result<(), WordSanitizerError> {
    if input.trim().is_empty() {
        return Err(WordSanitizerError::Validation("Input must not be blank".to_string()));
    }
    if !WORD_REGEX.is_match(input) {
        return Err(WordSanitizerError::Validation(
            "Input must start with a letter or underscore, and may only contain letters, digits, underscores, spaces, or asterisks".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn accepts_words_from_the_allowed_alphabet() {
        for word in ["SELECT", "_private", "SELECT * FROM", "CURRENT_PATH", "a1 b2"] {
            assert!(validate_word(word).is_ok(), "{word} should be valid");
        }
    }

    #[test]
    fn rejects_blank_words() {
        let err = validate_word("   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn rejects_bad_leading_character_and_punctuation() {
        assert!(validate_word("1SELECT").is_err());
        assert!(validate_word("*").is_err());
        assert!(validate_word("DROP;").is_err());
        assert!(validate_word("it's").is_err());
    }

    #[test]
    fn rejects_overlong_words() {
        let word = "A".repeat(MAX_WORD_LENGTH + 1);
        assert!(validate_word(&word).unwrap_err().to_string().contains("exceeds"));
        assert!(validate_word(&"A".repeat(MAX_WORD_LENGTH)).is_ok());
    }

    #[test]
    fn input_validation_has_no_length_cap() {
        let input = format!("I want {}", "x".repeat(MAX_WORD_LENGTH * 2));
        assert!(validate_input(&input).is_ok());
        assert!(validate_input("").is_err());
        assert!(!is_valid_word("select;"));
    }
}
