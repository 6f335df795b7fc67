//! This module defines what the main area of the UI shows.
use tracing::Level;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UIMode {
    /// The command terminal: scrollback plus prompt.
    #[default]
    Terminal,
    /// The application log, filtered by level and an optional substring.
    Logs {
        /// Substring to match, or `-substring` to exclude a module.
        filter: Option<String>,
        level: Level,
    },
}
