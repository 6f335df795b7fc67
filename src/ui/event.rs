//! This module defines the events driving the UI loop.
use crossterm::event::KeyEvent;

use crate::engine::CommandOutcome;

use super::log_entry::LogEntry;

#[derive(Debug)]
pub enum UIEvent {
    /// Log entries flushed by the `LogBuffer`.
    NewLogBatch(Vec<LogEntry>),
    /// The log display level changed; re-filter what is shown.
    RefreshLogs,
    KeyPress(KeyEvent),
    Resize(u16, u16),
    /// A spawned command handler completed.
    CommandFinished(CommandOutcome),
}
