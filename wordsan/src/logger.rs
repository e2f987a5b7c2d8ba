// wordsan/src/logger.rs
//! Logging setup for the `wordsan` binary.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Environment variable consulted for the log filter, in addition to `RUST_LOG`.
pub const LOG_ENV: &str = "WORDSAN_LOG";

/// Initializes `env_logger` on stderr.
///
/// `level` overrides whatever `WORDSAN_LOG` / `RUST_LOG` request. Calling this
/// more than once is harmless; later calls are ignored.
pub fn init_logger(level: Option<LevelFilter>) {
    let env = Env::default().filter_or(LOG_ENV, std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()));
    let mut builder = Builder::from_env(env);
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None);
    let _ = builder.try_init();
}
