//! Per-account settings files.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{Error, Result};
use crate::settings::value::Settings;

/// Loads and saves session settings as `<dir>/<account>_settings.json`.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    dir: PathBuf,
}

impl SettingsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Settings file for an account.
    pub fn path_for(&self, account: &str) -> PathBuf {
        self.dir.join(format!("{}_settings.json", account))
    }

    /// Load stored settings, `None` when the account has never logged in.
    pub async fn load(&self, account: &str) -> Result<Option<Settings>> {
        let path = self.path_for(account);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No settings file at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let settings: Settings = serde_json::from_str(&content)?;
        tracing::debug!("Loaded {} settings from {}", settings.len(), path.display());
        Ok(Some(settings))
    }

    /// Persist settings, creating the settings directory if needed.
    pub async fn save(&self, account: &str, settings: &Settings) -> Result<PathBuf> {
        ensure_settings_dir(&self.dir).await?;
        let path = self.path_for(account);
        let content = serde_json::to_string(settings)?;
        fs::write(&path, content).await?;
        Ok(path)
    }
}

async fn ensure_settings_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).await.map_err(|e| {
        Error::Config(format!(
            "Cannot create settings directory {}: {}",
            dir.display(),
            e
        ))
    })
}
