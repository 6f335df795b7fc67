//! This module handles the initial setup of the application.
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::args::AppArgs;
use crate::config::FolioConfig;
use crate::logging;
use crate::ports::{JsonPreferenceStore, PreferenceStore};
use crate::theme::Theme;

/// Everything the terminal needs to start, in either mode.
pub struct PreparedApp {
    pub args: AppArgs,
    /// The config file merged with command-line overrides.
    pub config: FolioConfig,
    /// The theme to start with.
    pub theme: Theme,
    pub preferences: Arc<dyn PreferenceStore>,
}

/// Prepares the application for running.
///
/// 1. Configures stderr logging in script mode (the TUI installs its own).
/// 2. Loads the config file and applies command-line overrides.
/// 3. Creates the data directory.
/// 4. Resolves the starting theme.
///
/// # Errors
///
/// Returns an error if the config is invalid or the data directory cannot be
/// created.
pub async fn prepare(args: AppArgs) -> Result<PreparedApp> {
    if args.script {
        logging::init_stderr_logging();
    }

    let mut config = FolioConfig::load(args.config.as_deref())?;
    if let Some(history_size) = args.history_size {
        config.history_size = history_size;
    }
    config.validate()?;

    std::fs::create_dir_all(&args.data_dir).with_context(|| {
        format!(
            "Could not create data directory '{}'",
            args.data_dir.display()
        )
    })?;

    let preferences: Arc<dyn PreferenceStore> =
        Arc::new(JsonPreferenceStore::new(&args.data_dir));
    let stored = match preferences.load_theme().await {
        Ok(theme) => theme,
        Err(e) => {
            warn!("Ignoring unreadable preferences: {:#}", e);
            None
        }
    };

    let theme = resolve_theme(args.theme, stored, config.theme);
    debug!("Starting with theme {}", theme);

    Ok(PreparedApp {
        args,
        config,
        theme,
        preferences,
    })
}

/// Picks the starting theme: command line, then saved preference, then
/// config file, then the default.
fn resolve_theme(cli: Option<Theme>, stored: Option<Theme>, config: Option<Theme>) -> Theme {
    cli.or(stored).or(config).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn theme_precedence() {
        use Theme::*;
        assert_eq!(resolve_theme(Some(Light), Some(Dark), Some(Holo)), Light);
        assert_eq!(resolve_theme(None, Some(Dark), Some(Light)), Dark);
        assert_eq!(resolve_theme(None, None, Some(Light)), Light);
        assert_eq!(resolve_theme(None, None, None), Holo);
    }

    #[tokio::test]
    async fn prepare_uses_saved_theme_and_cli_history_size() {
        let dir = tempfile::tempdir().unwrap();
        JsonPreferenceStore::new(dir.path())
            .save_theme(Theme::Dark)
            .await
            .unwrap();

        let args = AppArgs::parse_from([
            "folio-term",
            "--data-dir",
            dir.path().to_str().unwrap(),
            "--history-size",
            "7",
        ]);
        let prepared = prepare(args).await.unwrap();

        assert_eq!(prepared.theme, Theme::Dark);
        assert_eq!(prepared.config.history_size, 7);
    }

    #[tokio::test]
    async fn zero_history_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let args = AppArgs::parse_from([
            "folio-term",
            "--data-dir",
            dir.path().to_str().unwrap(),
            "--history-size",
            "0",
        ]);
        assert!(prepare(args).await.is_err());
    }
}
