//! Tracing/logging initialization.

use crate::cli::LogLevel;
use tracing_subscriber::EnvFilter;

/// Initialize logging for the process.
///
/// `RUST_LOG` takes precedence over `level`. Output goes to stderr so it never
/// mixes with the shell's prompts on stdout. Safe to call more than once.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
