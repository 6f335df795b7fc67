//! This module contains the `open` command handler.
use anyhow::Result;

use crate::engine::{CommandContext, CommandOutput};

pub(super) const USAGE: &str = "open <url>";

/// Adds `https://` to `target` unless it already names a scheme.
pub fn normalize_url(target: &str) -> String {
    if target.contains("://") || target.starts_with("mailto:") {
        target.to_string()
    } else {
        format!("https://{}", target)
    }
}

/// Opens the given link through the context's opener.
///
/// Usage: `open <url>`
///
/// # Errors
///
/// Returns the opener's error, which the engine prints as a single line.
pub async fn open_url(args: &[String], context: &CommandContext) -> Result<CommandOutput> {
    let Some(target) = args.first() else {
        return Ok(CommandOutput::line(format!("usage: {}", USAGE)));
    };

    let url = normalize_url(target);
    context.open(&url)?;
    Ok(CommandOutput::line(format!("opening {}", url)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_https_when_scheme_missing() {
        assert_eq!(normalize_url("github.com/me"), "https://github.com/me");
    }

    #[test]
    fn keeps_existing_scheme() {
        assert_eq!(normalize_url("http://a.dev"), "http://a.dev");
        assert_eq!(normalize_url("mailto:me@a.dev"), "mailto:me@a.dev");
    }
}
