//! This module contains the `theme` command handler.
use anyhow::Result;

use crate::engine::{CommandContext, CommandOutput};
use crate::theme::Theme;

pub(super) fn usage() -> String {
    format!("theme <{}>", Theme::choices())
}

/// Switches to the named theme.
///
/// Usage: `theme <holo|dark|light>`
///
/// Anything other than exactly one known theme name prints a single usage
/// line and leaves the theme untouched.
pub async fn set_theme(args: &[String], context: &CommandContext) -> Result<CommandOutput> {
    let theme = match args {
        [name] => name.parse::<Theme>().ok(),
        _ => None,
    };

    let Some(theme) = theme else {
        return Ok(CommandOutput::line(format!("usage: {}", usage())));
    };

    context.set_theme(theme);
    Ok(CommandOutput::line(format!("theme set to {}", theme)))
}
