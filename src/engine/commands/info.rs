//! This module contains command handlers for help and session information.
use anyhow::Result;

use crate::engine::{CommandContext, CommandOutput, Profile};

/// Lists every command, or shows the usage of one.
///
/// Usage: `help [command]`
///
/// # Arguments
///
/// * `args` - Optional command name to describe.
/// * `context` - Supplies the registered command list.
pub async fn show_help(args: &[String], context: &CommandContext) -> Result<CommandOutput> {
    if let Some(name) = args.first() {
        let Some(command) = context.commands().iter().find(|c| &c.name == name) else {
            return Ok(CommandOutput::line(format!("help: no such command '{}'", name)));
        };

        let mut lines = vec![format!("{} - {}", command.name, command.description)];
        if let Some(usage) = &command.usage {
            lines.push(format!("usage: {}", usage));
        }
        return Ok(CommandOutput::Lines(lines));
    }

    let width = context
        .commands()
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0);

    let mut lines = vec!["Available commands:".to_string()];
    lines.extend(
        context
            .commands()
            .iter()
            .map(|c| format!("  {:<width$}  {}", c.name, c.description, width = width)),
    );
    Ok(CommandOutput::Lines(lines))
}

/// Lists the history captured when the command was dispatched.
pub async fn show_history(context: &CommandContext) -> Result<CommandOutput> {
    Ok(CommandOutput::lines(
        context
            .history()
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("{:>4}  {}", i + 1, entry)),
    ))
}

/// Shows who the terminal belongs to.
pub async fn show_whoami(profile: &Profile) -> Result<CommandOutput> {
    Ok(CommandOutput::lines([
        profile.owner.clone(),
        profile.tagline.clone(),
    ]))
}
