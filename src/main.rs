//! The main entry point for folio-term.
use anyhow::Result;

/// Parses the command line and runs either the TUI or the script mode.
///
/// # Errors
///
/// Returns an error if setup fails or the terminal cannot be driven.
#[tokio::main]
async fn main() -> Result<()> {
    folio_term::app::launch().await
}
