//! This module wires `tracing` output into the terminal's log view, or to
//! stderr when running headless.
pub mod buffer;
pub mod collector;

pub use buffer::LogBuffer;
pub use collector::TUILogCollector;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "FOLIO_TERM_LOG";

/// Filter from `FOLIO_TERM_LOG`, or `default` when unset or invalid.
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Sends formatted logs to stderr so stdout stays free for command output.
pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
