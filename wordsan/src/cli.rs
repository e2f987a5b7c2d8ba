// wordsan/src/cli.rs
//! Command-line interface definition for `wordsan`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "wordsan",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Mask reserved words in text and manage the reserved-word list",
    long_about = "wordsan replaces every case-insensitive occurrence of a reserved word in the input with asterisks of the same length and prints the upper-cased result. The reserved-word list is stored in a JSON file and can be managed with the add, find, list, update and delete commands.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Suppress informational messages and logging.
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    /// Path of the JSON word store.
    #[arg(long = "store", value_name = "FILE", env = "WORDSAN_STORE", global = true, help = "Path of the JSON reserved-word store.")]
    pub store: Option<PathBuf>,

    /// YAML configuration file; takes precedence over --store.
    #[arg(long = "config", value_name = "FILE", env = "WORDSAN_CONFIG", global = true, help = "Path to a sanitizer configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Do not seed the default reserved words into an empty store.
    #[arg(long = "no-seed", global = true, help = "Do not seed the default reserved words into an empty store.")]
    pub no_seed: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Masks reserved words in the input text.
    #[command(about = "Masks reserved words in the given text, a file, or stdin.")]
    Sanitize(SanitizeCommand),

    #[command(about = "Adds a new reserved word.")]
    Add {
        #[arg(value_name = "WORD")]
        word: String,
    },

    #[command(about = "Finds a reserved word by id or by value.")]
    Find(WordSelector),

    #[command(about = "Lists all reserved words.")]
    List {
        /// Print JSON instead of a table.
        #[arg(long, help = "Print the list as JSON.")]
        json: bool,
    },

    #[command(about = "Renames an existing reserved word, keeping its id.")]
    Update {
        #[arg(value_name = "OLD")]
        old_word: String,
        #[arg(value_name = "NEW")]
        new_word: String,
    },

    #[command(about = "Deletes a reserved word by id or by value.")]
    Delete(WordSelector),

    #[command(about = "Adds the built-in default reserved words that are missing.")]
    Seed,
}

/// Arguments for the `sanitize` command.
#[derive(Args, Debug)]
pub struct SanitizeCommand {
    /// Text to sanitize (reads --input-file or stdin when omitted).
    #[arg(value_name = "TEXT", conflicts_with = "input_file")]
    pub text: Option<String>,

    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    #[arg(long = "summary", short = 's', help = "Print how often each reserved word matched to stderr.")]
    pub summary: bool,

    #[arg(long = "json", help = "Print the masked text and match summary as JSON.")]
    pub json: bool,
}

/// Selects a single record either by id or by word value.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct WordSelector {
    #[arg(long, value_name = "ID", value_parser = clap::value_parser!(u64).range(1..), help = "Record id (must be greater than 0).")]
    pub id: Option<u64>,

    #[arg(long, value_name = "WORD")]
    pub word: Option<String>,
}
