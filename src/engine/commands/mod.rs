//! This module contains the built-in commands.
//!
//! Each submodule holds the handlers for one area; `builtins` wires them into
//! `CommandSpec`s for the registry.
mod clock;
mod fact;
mod info;
mod open;
mod text;
mod theme;

use std::sync::Arc;

use super::options::Profile;
use super::registry::{handler_fn, CommandSpec};

pub use open::normalize_url;

/// Builds the default command table.
///
/// `help` is always part of it, so the registry can always resolve `help`.
pub(crate) fn builtins(profile: &Profile) -> Vec<CommandSpec> {
    let whoami_profile = Arc::new(profile.clone());
    let fact_profile = whoami_profile.clone();

    vec![
        CommandSpec::new(
            "help",
            "List available commands",
            handler_fn(|args, ctx| async move { info::show_help(&args, &ctx).await }),
        )
        .with_usage("help [command]"),
        CommandSpec::new(
            "clear",
            "Clear the terminal",
            handler_fn(|_, _| async move { text::clear().await }),
        ),
        CommandSpec::new(
            "echo",
            "Print the given text",
            handler_fn(|args, _| async move { text::echo(&args).await }),
        )
        .with_usage("echo <text>"),
        CommandSpec::new(
            "date",
            "Show today's date",
            handler_fn(|_, _| async move { clock::show_date().await }),
        ),
        CommandSpec::new(
            "time",
            "Show the current time",
            handler_fn(|_, _| async move { clock::show_time().await }),
        ),
        CommandSpec::new(
            "theme",
            "Switch the colour theme",
            handler_fn(|args, ctx| async move { theme::set_theme(&args, &ctx).await }),
        )
        .with_usage(theme::usage()),
        CommandSpec::new(
            "open",
            "Open a link in a new window",
            handler_fn(|args, ctx| async move { open::open_url(&args, &ctx).await }),
        )
        .with_usage(open::USAGE),
        CommandSpec::new(
            "history",
            "List previously entered commands",
            handler_fn(|_, ctx| async move { info::show_history(&ctx).await }),
        ),
        CommandSpec::new(
            "whoami",
            "Who this terminal belongs to",
            handler_fn(move |_, _| {
                let profile = whoami_profile.clone();
                async move { info::show_whoami(&profile).await }
            }),
        ),
        CommandSpec::new(
            "fact",
            "Show today's fun fact",
            handler_fn(move |_, _| {
                let profile = fact_profile.clone();
                async move { fact::show_fact(&profile.facts, fact::day_seed()).await }
            }),
        ),
    ]
}
