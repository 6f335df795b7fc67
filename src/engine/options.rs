//! Construction-time configuration for a `CommandEngine`.
use std::fmt;
use std::sync::Arc;

use crate::facts::{default_facts, FactDeck};
use crate::ports::Opener;
use crate::theme::Theme;

use super::history::DEFAULT_HISTORY_SIZE;
use super::registry::CommandSpec;

/// Who the terminal belongs to, used by `whoami` and `fact`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub owner: String,
    pub tagline: String,
    pub facts: FactDeck,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            owner: "guest".to_string(),
            tagline: "Visitor of this portfolio".to_string(),
            facts: FactDeck::new(default_facts()),
        }
    }
}

/// Everything a `CommandEngine` is built from.
pub struct EngineOptions {
    /// Lines shown in the scrollback before anything is typed.
    pub initial_lines: Vec<String>,
    /// Theme active at start.
    pub theme: Theme,
    /// Maximum number of history entries (clamped to at least one).
    pub history_size: usize,
    /// Extra commands, replacing built-ins of the same name.
    pub commands: Vec<CommandSpec>,
    /// Interceptor for `open`; the system opener is used when absent.
    pub opener: Option<Arc<dyn Opener>>,
    pub profile: Profile,
}

impl EngineOptions {
    pub fn with_initial_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.initial_lines = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_history_size(mut self, history_size: usize) -> Self {
        self.history_size = history_size;
        self
    }

    pub fn with_command(mut self, command: CommandSpec) -> Self {
        self.commands.push(command);
        self
    }

    pub fn with_opener(mut self, opener: impl Opener + 'static) -> Self {
        self.opener = Some(Arc::new(opener));
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            initial_lines: Vec::new(),
            theme: Theme::default(),
            history_size: DEFAULT_HISTORY_SIZE,
            commands: Vec::new(),
            opener: None,
            profile: Profile::default(),
        }
    }
}

impl fmt::Debug for EngineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineOptions")
            .field("initial_lines", &self.initial_lines)
            .field("theme", &self.theme)
            .field("history_size", &self.history_size)
            .field("commands", &self.commands)
            .field("opener", &self.opener.is_some())
            .field("profile", &self.profile)
            .finish()
    }
}
