//! This module defines one captured log line.
use chrono::{DateTime, Utc};
use tracing::Level;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    /// Last segment of the emitting module path.
    pub module: String,
    pub message: String,
}
