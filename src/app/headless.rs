//! This module runs the terminal without a screen: commands come from stdin,
//! one per line, and scrollback goes to stdout.
use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::config::FolioConfig;
use crate::engine::{CommandEngine, PROMPT};
use crate::ports::PreferenceStore;
use crate::theme::Theme;

/// Tracks which scrollback lines were already written out.
#[derive(Debug, Default)]
pub struct ScrollbackPrinter {
    epoch: u64,
    printed: usize,
}

impl ScrollbackPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines added since the last call. After a clear, the whole (new)
    /// scrollback counts as unprinted.
    pub fn take_new<'a>(&mut self, engine: &'a CommandEngine) -> &'a [String] {
        if engine.scrollback_epoch() != self.epoch {
            self.epoch = engine.scrollback_epoch();
            self.printed = 0;
        }

        let scrollback = engine.scrollback();
        let start = self.printed.min(scrollback.len());
        self.printed = scrollback.len();
        &scrollback[start..]
    }
}

fn styled(line: &str) -> String {
    if line.starts_with(PROMPT) {
        line.cyan().bold().to_string()
    } else if line.starts_with("error: ") || line.starts_with("command not found: ") {
        line.red().to_string()
    } else {
        line.to_string()
    }
}

pub async fn run(
    config: FolioConfig,
    theme: Theme,
    preferences: Arc<dyn PreferenceStore>,
) -> Result<()> {
    let mut engine = CommandEngine::new(config.engine_options(theme));
    let mut printer = ScrollbackPrinter::new();
    let mut saved_theme = engine.theme();
    let mut stdout = std::io::stdout();

    for line in printer.take_new(&engine) {
        writeln!(stdout, "{}", styled(line))?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        engine.execute(&line).await?;

        for line in printer.take_new(&engine) {
            writeln!(stdout, "{}", styled(line))?;
        }
        stdout.flush()?;

        if engine.theme() != saved_theme {
            saved_theme = engine.theme();
            if let Err(e) = preferences.save_theme(saved_theme).await {
                warn!("Could not save theme preference: {:#}", e);
            }
        }
    }

    debug!("Input closed after {} commands", engine.history().len());
    Ok(())
}
