use tracing::{debug, Level};

use crate::engine::tokenize;
use crate::ui::UIState;

use super::LogView;

pub(super) const LEVELS: &str = "trace|debug|info|warn|error";

fn parse_level(name: &str) -> Option<Level> {
    match name.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

impl LogView {
    /// Runs a log view command.
    ///
    /// * `level <trace|debug|info|warn|error>` - minimum level shown
    /// * `filter [text]` - include (or `-text` exclude) matching entries; no argument clears it
    /// * `clear` - drop every captured entry
    /// * `tail <n>` - keep only the newest `n` entries
    pub(crate) fn execute_command(&self, input: &str, state: &mut UIState) {
        let tokens = tokenize(input);
        let Some((command, args)) = tokens.split_first() else {
            return;
        };

        match command.as_str() {
            "level" => match args.first().and_then(|name| parse_level(name)) {
                Some(level) => {
                    state.set_log_level(level);
                    debug!("Log level set to {}", level);
                }
                None => debug!("Usage: level <{}>", LEVELS),
            },
            "filter" => {
                let filter = (!args.is_empty()).then(|| args.join(" "));
                debug!("Log filter set to {:?}", filter);
                state.set_log_filter(filter);
            }
            "clear" => {
                state.clear_logs();
                debug!("Log view cleared");
            }
            "tail" => match args.first().and_then(|n| n.parse::<usize>().ok()) {
                Some(keep) => {
                    let excess = state.logs.len().saturating_sub(keep);
                    state.logs.drain(..excess);
                    state.jump_to_bottom_log();
                }
                None => debug!("Usage: tail <number>"),
            },
            other => debug!("Unknown log command: {}", other),
        }
    }
}
