// wordsan-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

use wordsan_core::config::{load_default_words, SanitizerConfig, StoreKind};
use wordsan_core::ErrorKind;

#[test]
fn test_load_default_words() {
    let words = load_default_words().unwrap();
    assert!(words.iter().any(|w| w == "SELECT"));
    assert!(words.iter().any(|w| w == "SELECT * FROM"));
    for word in &words {
        assert!(wordsan_core::validate_word(word).is_ok(), "default word '{}' is invalid", word);
    }
}

#[test]
fn test_load_from_file() -> Result<()> {
    let dir = tempdir()?;
    let store_path = dir.path().join("words.json");
    let yaml_content = format!(
        r#"
store:
  kind: json
  path: "{}"
cache:
  enabled: false
seed_defaults: false
words:
  - SELECT
  - CURRENT_PATH
"#,
        store_path.display()
    );
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;

    let config = SanitizerConfig::load_from_file(file.path())?;
    assert_eq!(config.store.kind, StoreKind::Json);
    assert!(!config.cache.enabled);
    assert_eq!(config.words, vec!["SELECT", "CURRENT_PATH"]);
    Ok(())
}

#[test]
fn test_missing_fields_take_defaults() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"words: [DROP]\n")?;
    let config = SanitizerConfig::load_from_file(file.path())?;
    assert_eq!(config.store.kind, StoreKind::Memory);
    assert!(config.cache.enabled);
    assert!(config.seed_defaults);
    Ok(())
}

#[test]
fn test_json_store_requires_path() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"store:\n  kind: json\n")?;
    let err = SanitizerConfig::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("store.path"));
    Ok(())
}

#[test]
fn test_invalid_and_duplicate_words_are_reported_together() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"words:\n  - SELECT\n  - SELECT\n  - \"1DROP\"\n")?;
    let err = SanitizerConfig::load_from_file(file.path()).unwrap_err().to_string();
    assert!(err.contains("Duplicate word found: 'SELECT'"));
    assert!(err.contains("1DROP"));
    Ok(())
}

#[test]
fn test_build_service_seeds_defaults_once() -> Result<()> {
    let dir = tempdir()?;
    let config = SanitizerConfig::json_store(dir.path().join("words.json"));
    let defaults = load_default_words()?.len();

    let service = config.build_service()?;
    assert_eq!(service.list_all()?.len(), defaults);
    service.delete_word_by_value("SELECT")?;

    // Reopening a non-empty store does not re-seed the defaults.
    let reopened = config.build_service()?;
    assert_eq!(reopened.list_all()?.len(), defaults - 1);
    assert_eq!(reopened.find_by_word("SELECT").unwrap_err().kind(), ErrorKind::RecordNotFound);
    Ok(())
}

#[test]
fn test_build_service_with_memory_store_and_extra_words() -> Result<()> {
    let config = SanitizerConfig {
        seed_defaults: false,
        words: vec!["CURRENT_PATH".to_string()],
        ..SanitizerConfig::default()
    };
    let service = config.build_service()?;
    assert_eq!(service.sanitize("check the current_path")?, "CHECK THE ************");
    Ok(())
}

#[test]
fn test_emptied_store_stays_empty_after_rebuild() -> Result<()> {
    let dir = tempdir()?;
    let config = SanitizerConfig::json_store(dir.path().join("words.json"));

    let service = config.build_service()?;
    for word in service.list_all()? {
        service.delete_word_by_id(word.id)?;
    }
    assert_eq!(service.list_all().unwrap_err().kind(), ErrorKind::RecordNotFound);

    let rebuilt = config.build_service()?;
    assert_eq!(rebuilt.list_all().unwrap_err().kind(), ErrorKind::RecordNotFound);
    assert_eq!(rebuilt.sanitize("drop table")?, "DROP TABLE");
    Ok(())
}

#[test]
fn test_configured_words_are_not_re_added_after_delete() -> Result<()> {
    let dir = tempdir()?;
    let config = SanitizerConfig {
        seed_defaults: false,
        words: vec!["SHUTDOWN".to_string(), "CURRENT_PATH".to_string()],
        ..SanitizerConfig::json_store(dir.path().join("words.json"))
    };

    let service = config.build_service()?;
    assert_eq!(service.list_all()?.len(), 2);
    service.delete_word_by_value("SHUTDOWN")?;

    let rebuilt = config.build_service()?;
    let words: Vec<String> = rebuilt.list_all()?.into_iter().map(|w| w.word).collect();
    assert_eq!(words, ["CURRENT_PATH"]);
    assert_eq!(rebuilt.sanitize("shutdown now")?, "SHUTDOWN NOW");
    Ok(())
}

#[test]
fn test_default_words_list_longer_spans_first() -> Result<()> {
    let words = load_default_words()?;
    for (i, earlier) in words.iter().enumerate() {
        for later in &words[i + 1..] {
            assert!(
                !later.to_uppercase().contains(&earlier.to_uppercase()),
                "'{}' must be listed before '{}'",
                later,
                earlier
            );
        }
    }

    let config = SanitizerConfig::default();
    let service = config.build_service()?;
    assert_eq!(service.sanitize("execute exec")?, "******* ****");
    Ok(())
}
