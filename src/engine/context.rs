//! This module defines the `CommandContext`, the restricted set of side
//! effects a command handler may perform.
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::debug;

use crate::ports::Opener;
use crate::theme::Theme;

/// A state change requested by a handler and applied by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Effect {
    Print(String),
    SetTheme(Theme),
    Clear,
}

/// Name and description of a registered command, as listed by `help`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSummary {
    pub name: String,
    pub description: String,
    pub usage: Option<String>,
}

/// Provides side effects and read-only engine state to command handlers.
///
/// The context is cheap to clone and `'static`, so a handler may keep it
/// across await points. Printed lines and theme changes are queued and show
/// up in the engine the next time it pumps its effects.
#[derive(Clone)]
pub struct CommandContext {
    effects: mpsc::UnboundedSender<Effect>,
    opener: Arc<dyn Opener>,
    theme: Theme,
    commands: Arc<Vec<CommandSummary>>,
    history: Arc<Vec<String>>,
}

impl CommandContext {
    pub(crate) fn new(
        effects: mpsc::UnboundedSender<Effect>,
        opener: Arc<dyn Opener>,
        theme: Theme,
        commands: Arc<Vec<CommandSummary>>,
        history: Arc<Vec<String>>,
    ) -> Self {
        Self {
            effects,
            opener,
            theme,
            commands,
            history,
        }
    }

    fn emit(&self, effect: Effect) {
        if self.effects.send(effect).is_err() {
            debug!("Engine dropped; discarding handler effect");
        }
    }

    /// Appends a line to the scrollback.
    pub fn print<S: Into<String>>(&self, line: S) {
        self.emit(Effect::Print(line.into()));
    }

    /// Empties the scrollback.
    pub fn clear(&self) {
        self.emit(Effect::Clear);
    }

    /// Switches the active theme.
    pub fn set_theme(&self, theme: Theme) {
        self.emit(Effect::SetTheme(theme));
    }

    /// Opens `target` through the configured opener.
    ///
    /// # Errors
    ///
    /// Returns whatever error the opener reports.
    pub fn open(&self, target: &str) -> Result<()> {
        debug!("Opening {}", target);
        self.opener.open(target)
    }

    /// The theme that was active when the command was dispatched.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Every registered command, sorted by name.
    pub fn commands(&self) -> &[CommandSummary] {
        &self.commands
    }

    /// History as it was when the command was dispatched, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }
}
