//! This module contains the log view: a filtered, scrollable list of the
//! application's own log entries with a small command line.
mod commands;
mod keys;
mod render;

use crate::engine::History;

const LOG_HISTORY_SIZE: usize = 50;

/// Input history and command handling for the log view.
#[derive(Debug)]
pub struct LogView {
    history: History,
}

impl LogView {
    pub fn new() -> Self {
        Self {
            history: History::new(LOG_HISTORY_SIZE),
        }
    }
}

impl Default for LogView {
    fn default() -> Self {
        Self::new()
    }
}
