// wordsan/src/commands/mod.rs
//! Command dispatch, service bootstrap and exit-code mapping.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::debug;
use std::io;
use std::path::PathBuf;

use wordsan_core::{ErrorKind, SanitizerConfig, SanitizerService, WordSanitizerError};

use crate::cli::{Cli, Commands};
use crate::ui::output_format;

pub mod sanitize;
pub mod words;

pub const EXIT_INTERNAL: i32 = 1;
pub const EXIT_VALIDATION: i32 = 2;
pub const EXIT_NOT_FOUND: i32 = 3;
pub const EXIT_DUPLICATE: i32 = 4;

const STORE_FILE_NAME: &str = "words.json";

/// Maps a failure onto the process exit code by its core error kind.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<WordSanitizerError>().map(WordSanitizerError::kind) {
        Some(ErrorKind::Validation) => EXIT_VALIDATION,
        Some(ErrorKind::RecordNotFound) => EXIT_NOT_FOUND,
        Some(ErrorKind::DuplicateRecord) => EXIT_DUPLICATE,
        Some(ErrorKind::Sanitization) | Some(ErrorKind::EntitySave) | None => EXIT_INTERNAL,
    }
}

/// Default store location: the platform data directory, else the working directory.
pub fn default_store_path() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("wordsan").join(STORE_FILE_NAME),
        None => PathBuf::from(STORE_FILE_NAME),
    }
}

fn resolve_config(cli: &Cli) -> Result<SanitizerConfig> {
    let mut config = match &cli.config {
        Some(path) => SanitizerConfig::load_from_file(path)?,
        None => SanitizerConfig::json_store(cli.store.clone().unwrap_or_else(default_store_path)),
    };
    if cli.no_seed {
        config.seed_defaults = false;
    }
    Ok(config)
}

fn build_service(cli: &Cli) -> Result<SanitizerService> {
    let config = resolve_config(cli)?;
    debug!("Resolved sanitizer config: {:?}", config);
    config.build_service().context("Failed to initialise the sanitizer")
}

/// Prints a status line to stderr unless `--quiet` was given.
pub fn info_msg(cli: &Cli, msg: impl AsRef<str>) {
    if cli.quiet {
        return;
    }
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_success_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

/// Prints a neutral status line to stderr unless `--quiet` was given.
pub fn note_msg(cli: &Cli, msg: impl AsRef<str>) {
    if cli.quiet {
        return;
    }
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

pub fn warn_msg(cli: &Cli, msg: impl AsRef<str>) {
    if cli.quiet {
        return;
    }
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

pub fn error_msg(msg: impl AsRef<str>) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), stderr_supports_color);
}

/// Runs the parsed command line.
pub fn run(cli: &Cli) -> Result<()> {
    let service = build_service(cli)?;
    let mut stdout = io::stdout().lock();

    match &cli.command {
        Commands::Sanitize(cmd) => sanitize::run_sanitize(&service, cmd, cli, &mut stdout),
        Commands::Add { word } => words::run_add(&service, word, cli, &mut stdout),
        Commands::Find(selector) => words::run_find(&service, selector, &mut stdout),
        Commands::List { json } => words::run_list(&service, *json, &mut stdout),
        Commands::Update { old_word, new_word } => words::run_update(&service, old_word, new_word, cli, &mut stdout),
        Commands::Delete(selector) => words::run_delete(&service, selector, cli),
        Commands::Seed => words::run_seed(&service, cli, &mut stdout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        let not_found = anyhow::Error::new(WordSanitizerError::RecordNotFound("gone".to_string()));
        let duplicate = anyhow::Error::new(WordSanitizerError::DuplicateRecord("twice".to_string()));
        let invalid = anyhow::Error::new(WordSanitizerError::Validation("bad".to_string()));
        assert_eq!(exit_code_for(&not_found), EXIT_NOT_FOUND);
        assert_eq!(exit_code_for(&duplicate), EXIT_DUPLICATE);
        assert_eq!(exit_code_for(&invalid), EXIT_VALIDATION);
        assert_eq!(exit_code_for(&anyhow::anyhow!("io")), EXIT_INTERNAL);
    }

    #[test]
    fn context_does_not_hide_the_kind() {
        let err = anyhow::Error::new(WordSanitizerError::RecordNotFound("gone".to_string()))
            .context("while deleting");
        assert_eq!(exit_code_for(&err), EXIT_NOT_FOUND);
    }
}
