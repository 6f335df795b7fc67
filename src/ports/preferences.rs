//! This module defines the storage interface and implementations for user preferences.
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::theme::Theme;

const PREFERENCES_FILE: &str = "preferences.json";

/// A trait for persisting the preferences that survive between sessions.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Loads the saved theme, if one was ever stored.
    ///
    /// # Errors
    ///
    /// This function will return an error if the stored data cannot be read.
    async fn load_theme(&self) -> Result<Option<Theme>>;

    /// Saves the active theme.
    ///
    /// # Errors
    ///
    /// This function will return an error if the theme cannot be written.
    async fn save_theme(&self, theme: Theme) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(default)]
    theme: Option<Theme>,
}

/// A `PreferenceStore` that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    theme: Mutex<Option<Theme>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme: Mutex::new(Some(theme)),
        }
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn load_theme(&self) -> Result<Option<Theme>> {
        Ok(*self.theme.lock().unwrap_or_else(PoisonError::into_inner))
    }

    async fn save_theme(&self, theme: Theme) -> Result<()> {
        *self.theme.lock().unwrap_or_else(PoisonError::into_inner) = Some(theme);
        Ok(())
    }
}

/// A `PreferenceStore` backed by a JSON file in the data directory.
#[derive(Debug, Clone)]
pub struct JsonPreferenceStore {
    path: PathBuf,
}

impl JsonPreferenceStore {
    /// Creates a store that reads and writes `preferences.json` under `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(PREFERENCES_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Preferences> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("Malformed preferences in '{}'", self.path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Preferences::default()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read preferences '{}'", self.path.display())),
        }
    }
}

#[async_trait]
impl PreferenceStore for JsonPreferenceStore {
    async fn load_theme(&self) -> Result<Option<Theme>> {
        Ok(self.read().await?.theme)
    }

    async fn save_theme(&self, theme: Theme) -> Result<()> {
        let mut preferences = self.read().await.unwrap_or_default();
        preferences.theme = Some(theme);

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(&preferences)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .with_context(|| format!("Failed to write preferences '{}'", self.path.display()))?;
        Ok(())
    }
}
