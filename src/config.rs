//! This module loads the terminal's JSON configuration file.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::engine::{EngineOptions, Profile, DEFAULT_HISTORY_SIZE};
use crate::facts::{default_facts, Fact, FactDeck};
use crate::theme::Theme;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("history_size must be at least 1")]
    ZeroHistorySize,
}

/// Contents of the config file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub owner: String,
    pub tagline: String,
    /// Lines shown before the first prompt.
    pub greeting: Vec<String>,
    pub theme: Option<Theme>,
    pub history_size: usize,
    pub facts: Vec<Fact>,
}

impl Default for FolioConfig {
    fn default() -> Self {
        let profile = Profile::default();
        Self {
            owner: profile.owner,
            tagline: profile.tagline,
            greeting: vec![
                "Welcome to the portfolio terminal.".to_string(),
                "Type 'help' for available commands.".to_string(),
            ],
            theme: None,
            history_size: DEFAULT_HISTORY_SIZE,
            facts: default_facts(),
        }
    }
}

impl FolioConfig {
    /// Loads the config at `path`, or the defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or parsed, or if a
    /// value is out of range.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            debug!("No config file given, using defaults");
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Checks values serde cannot reject on its own.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroHistorySize` for a zero history bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_size == 0 {
            return Err(ConfigError::ZeroHistorySize);
        }
        Ok(())
    }

    pub fn profile(&self) -> Profile {
        Profile {
            owner: self.owner.clone(),
            tagline: self.tagline.clone(),
            facts: FactDeck::new(self.facts.clone()),
        }
    }

    /// Engine options for this config, starting with `theme`.
    pub fn engine_options(&self, theme: Theme) -> EngineOptions {
        EngineOptions::default()
            .with_initial_lines(self.greeting.clone())
            .with_theme(theme)
            .with_history_size(self.history_size)
            .with_profile(self.profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_path_gives_defaults() {
        let config = FolioConfig::load(None).unwrap();
        assert_eq!(config, FolioConfig::default());
        assert_eq!(config.history_size, DEFAULT_HISTORY_SIZE);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_config(r#"{ "owner": "ada", "theme": "light", "history_size": 3 }"#);
        let config = FolioConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.owner, "ada");
        assert_eq!(config.theme, Some(Theme::Light));
        assert_eq!(config.history_size, 3);
        assert_eq!(config.facts, default_facts());
    }

    #[test]
    fn facts_without_weight_default_to_one() {
        let file = write_config(r#"{ "facts": [{ "text": "I like tea" }] }"#);
        let config = FolioConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.facts, vec![Fact::new("I like tea", 1)]);
    }

    #[test]
    fn zero_history_size_is_rejected() {
        let file = write_config(r#"{ "history_size": 0 }"#);
        assert!(matches!(
            FolioConfig::load(Some(file.path())),
            Err(ConfigError::ZeroHistorySize)
        ));
    }

    #[test]
    fn unknown_theme_is_a_parse_error() {
        let file = write_config(r#"{ "theme": "neon" }"#);
        assert!(matches!(
            FolioConfig::load(Some(file.path())),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(matches!(
            FolioConfig::load(Some(&path)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn engine_options_carry_the_profile() {
        let config = FolioConfig {
            owner: "ada".into(),
            ..FolioConfig::default()
        };
        let options = config.engine_options(Theme::Dark);
        assert_eq!(options.theme, Theme::Dark);
        assert_eq!(options.profile.owner, "ada");
        assert_eq!(options.initial_lines, config.greeting);
    }
}
