//! Terminal output helpers.

pub mod output_format;
pub mod word_table;
