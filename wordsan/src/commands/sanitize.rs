// wordsan/src/commands/sanitize.rs
//! The `sanitize` command.

use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::io::{self, Read, Write};

use wordsan_core::{validate_input, SanitizerService};

use crate::cli::{Cli, SanitizeCommand};
use crate::ui::word_table;

fn read_input(cmd: &SanitizeCommand) -> Result<String> {
    let raw = if let Some(text) = &cmd.text {
        text.clone()
    } else if let Some(path) = &cmd.input_file {
        fs::read_to_string(path).with_context(|| format!("Failed to read input file: {}", path.display()))?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).context("Failed to read input from stdin")?;
        buffer
    };
    Ok(raw.trim_end_matches(['\n', '\r']).to_string())
}

pub fn run_sanitize<W: Write>(service: &SanitizerService, cmd: &SanitizeCommand, cli: &Cli, out: &mut W) -> Result<()> {
    let input = read_input(cmd)?;
    validate_input(&input)?;

    let outcome = service.sanitize_report(&input)?;
    info!("Sanitization complete, {} reserved word(s) matched.", outcome.summary.len());

    if cmd.json {
        serde_json::to_writer_pretty(&mut *out, &outcome)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", outcome.masked)?;
    }

    if cmd.summary && !cli.quiet {
        writeln!(io::stderr(), "{}", word_table::render_summary(&outcome.summary))?;
    }
    Ok(())
}
