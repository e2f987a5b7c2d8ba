// wordsan/src/ui/output_format.rs
//! Formatting of status messages written to stderr.

use anyhow::Result;
use owo_colors::OwoColorize;
use std::io::Write;

fn print_tagged<W: Write>(
    writer: &mut W,
    tag: &str,
    message: &str,
    supports_color: bool,
    paint: impl Fn(&str) -> String,
) -> Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", paint(tag), message)?;
    } else {
        writeln!(writer, "{} {}", tag, message)?;
    }
    Ok(())
}

pub fn print_info_message<W: Write>(writer: &mut W, message: &str, supports_color: bool) -> Result<()> {
    print_tagged(writer, "[INFO]", message, supports_color, |t| t.cyan().to_string())
}

pub fn print_success_message<W: Write>(writer: &mut W, message: &str, supports_color: bool) -> Result<()> {
    print_tagged(writer, "[OK]", message, supports_color, |t| t.green().bold().to_string())
}

pub fn print_warn_message<W: Write>(writer: &mut W, message: &str, supports_color: bool) -> Result<()> {
    print_tagged(writer, "[WARN]", message, supports_color, |t| t.yellow().to_string())
}

pub fn print_error_message<W: Write>(writer: &mut W, message: &str, supports_color: bool) -> Result<()> {
    print_tagged(writer, "[ERROR]", message, supports_color, |t| t.red().bold().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_output_has_no_escape_codes() {
        let mut out = Vec::new();
        print_error_message(&mut out, "The id 999 does not exist", false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[ERROR] The id 999 does not exist\n");
    }

    #[test]
    fn colored_output_wraps_the_tag_only() {
        let mut out = Vec::new();
        print_success_message(&mut out, "done", true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\u{1b}["));
        assert!(text.ends_with(" done\n"));
    }
}
