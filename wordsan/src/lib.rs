// wordsan/src/lib.rs
//! # wordsan CLI
//!
//! Command-line transport for `wordsan-core`: argument parsing, logging
//! setup, output formatting and the mapping of core error kinds onto exit
//! codes.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;

pub use commands::{exit_code_for, run};
