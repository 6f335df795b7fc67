//! This module contains the `date` and `time` command handlers.
use anyhow::Result;
use chrono::Local;

use crate::engine::CommandOutput;

const DATE_FORMAT: &str = "%a %b %d %Y";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Shows the local date, e.g. `Mon Oct 19 2026`.
pub async fn show_date() -> Result<CommandOutput> {
    Ok(CommandOutput::line(Local::now().format(DATE_FORMAT).to_string()))
}

/// Shows the local wall-clock time, e.g. `14:03:59`.
pub async fn show_time() -> Result<CommandOutput> {
    Ok(CommandOutput::line(Local::now().format(TIME_FORMAT).to_string()))
}
