//! This module runs the interactive full-screen terminal.
use std::sync::Arc;

use anyhow::Result;

use crate::config::FolioConfig;
use crate::engine::CommandEngine;
use crate::ports::PreferenceStore;
use crate::theme::Theme;
use crate::ui::run_tui;

pub async fn run(
    config: FolioConfig,
    theme: Theme,
    preferences: Arc<dyn PreferenceStore>,
) -> Result<()> {
    let engine = CommandEngine::new(config.engine_options(theme));
    run_tui(engine, preferences).await
}
