//! This module contains the `echo` and `clear` command handlers.
use anyhow::Result;

use crate::engine::CommandOutput;

/// Prints the arguments joined by single spaces.
///
/// Usage: `echo <text>`
pub async fn echo(args: &[String]) -> Result<CommandOutput> {
    Ok(CommandOutput::line(args.join(" ")))
}

/// Asks the engine to empty the scrollback.
pub async fn clear() -> Result<CommandOutput> {
    Ok(CommandOutput::Clear)
}
