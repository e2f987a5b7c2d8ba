// wordsan/src/commands/words.rs
//! Reserved-word management commands.

use anyhow::{bail, Result};
use std::io::Write;

use wordsan_core::{load_default_words, ReservedWord, SanitizerService};

use crate::cli::{Cli, WordSelector};
use crate::commands::{info_msg, note_msg, warn_msg};
use crate::ui::word_table;

fn print_record<W: Write>(out: &mut W, record: &ReservedWord) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, record)?;
    writeln!(out)?;
    Ok(())
}

pub fn run_add<W: Write>(service: &SanitizerService, word: &str, cli: &Cli, out: &mut W) -> Result<()> {
    let saved = service.add_word(word)?;
    info_msg(cli, format!("Reserved word created with id {}.", saved.id));
    print_record(out, &saved)
}

pub fn run_find<W: Write>(service: &SanitizerService, selector: &WordSelector, out: &mut W) -> Result<()> {
    let found = match (selector.id, &selector.word) {
        (Some(id), _) => service.find_by_id(id)?,
        (None, Some(word)) => {
            wordsan_core::validate_input(word)?;
            service.find_by_word(word)?
        }
        (None, None) => bail!("Either --id or --word is required"),
    };
    print_record(out, &found)
}

pub fn run_list<W: Write>(service: &SanitizerService, json: bool, out: &mut W) -> Result<()> {
    let words = service.list_all()?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &words)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", word_table::render_words(&words))?;
    }
    Ok(())
}

pub fn run_update<W: Write>(
    service: &SanitizerService,
    old_word: &str,
    new_word: &str,
    cli: &Cli,
    out: &mut W,
) -> Result<()> {
    let updated = service.update_word(old_word, new_word)?;
    info_msg(cli, "Record updated successfully.");
    print_record(out, &updated)
}

pub fn run_delete(service: &SanitizerService, selector: &WordSelector, cli: &Cli) -> Result<()> {
    match (selector.id, &selector.word) {
        (Some(id), _) => service.delete_word_by_id(id)?,
        (None, Some(word)) => service.delete_word_by_value(word)?,
        (None, None) => bail!("Either --id or --word is required"),
    };
    info_msg(cli, "Record deleted successfully.");
    Ok(())
}

pub fn run_seed<W: Write>(service: &SanitizerService, cli: &Cli, out: &mut W) -> Result<()> {
    let defaults = load_default_words()?;
    note_msg(cli, format!("Seeding {} default reserved word(s).", defaults.len()));
    let inserted = service.seed_words(&defaults)?;
    if inserted == 0 {
        warn_msg(cli, "All default reserved words are already present.");
    } else {
        info_msg(cli, format!("Seeded {} default reserved word(s).", inserted));
    }
    writeln!(out, "{}", inserted)?;
    Ok(())
}
