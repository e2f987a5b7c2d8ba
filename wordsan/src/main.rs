// wordsan/src/main.rs
//! wordsan entry point.
//!
//! Loads `.env`, parses the command line, configures logging and runs the
//! selected command. Failures are printed to stderr and mapped onto an exit
//! code by their error kind.

use clap::Parser;
use log::LevelFilter;

use wordsan::cli::Cli;
use wordsan::commands::{error_msg, exit_code_for, run};
use wordsan::logger;

fn main() {
    // A missing .env file is the common case.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    if let Err(e) = run(&cli) {
        error_msg(format!("{:#}", e));
        std::process::exit(exit_code_for(&e));
    }
}
