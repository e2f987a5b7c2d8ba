// wordsan/src/ui/word_table.rs
//! Table rendering for reserved-word listings and match summaries.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use wordsan_core::{MaskSummaryItem, ReservedWord};

pub fn render_words(words: &[ReservedWord]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Word"]);
    for word in words {
        table.add_row(vec![word.id.to_string(), word.word.clone()]);
    }
    table.to_string()
}

pub fn render_summary(summary: &[MaskSummaryItem]) -> String {
    if summary.is_empty() {
        return "No reserved words matched.".to_string();
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Reserved word", "Occurrences"]);
    for item in summary {
        table.add_row(vec![item.word.clone(), item.occurrences.to_string()]);
    }
    table.to_string()
}
