//! Configuration structures and loading logic.

use crate::config::modes::FeedMode;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default root of the output tree.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "saved";

/// Default directory holding per-account session settings.
pub const DEFAULT_SETTINGS_DIRECTORY: &str = "cookies";

/// Run configuration handed to every component at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Account whose saved feed is archived.
    pub account_name: String,

    /// Write every fetched feed page to the cache directory.
    pub cache_enabled: bool,

    /// Read the feed from the cache directory instead of the network.
    pub replay_from_cache: bool,

    /// Root of the output tree (`saved` by default).
    pub output_root: PathBuf,

    /// Directory holding `<account>_settings.json` files.
    pub settings_dir: PathBuf,
}

impl Config {
    /// Create a configuration with default paths for an account.
    pub fn new(account_name: impl Into<String>) -> Self {
        Self {
            account_name: account_name.into(),
            cache_enabled: true,
            replay_from_cache: false,
            output_root: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            settings_dir: PathBuf::from(DEFAULT_SETTINGS_DIRECTORY),
        }
    }

    /// Apply defaults from an optional configuration file.
    pub fn apply_file(&mut self, file: &ConfigFile) {
        if let Some(dir) = &file.options.output_directory {
            self.output_root = dir.clone();
        }
        if let Some(dir) = &file.options.settings_directory {
            self.settings_dir = dir.clone();
        }
        self.cache_enabled = file.options.cache_feed_pages;
    }

    /// Where the feed for this run comes from.
    pub fn feed_mode(&self) -> FeedMode {
        FeedMode::from_flags(self.replay_from_cache, !self.cache_enabled)
    }

    /// Directory of per-post output folders.
    pub fn posts_dir(&self) -> PathBuf {
        self.output_root.join(&self.account_name).join("posts")
    }

    /// Directory of cached raw feed pages.
    pub fn cache_dir(&self) -> PathBuf {
        self.output_root.join(&self.account_name).join("json")
    }
}

/// Optional on-disk defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub options: OptionsConfig,
}

/// `[options]` table of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Root of the output tree.
    #[serde(default)]
    pub output_directory: Option<PathBuf>,

    /// Directory holding session settings files.
    #[serde(default)]
    pub settings_directory: Option<PathBuf>,

    /// Whether fetched feed pages are cached to disk.
    #[serde(default = "default_true")]
    pub cache_feed_pages: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            output_directory: None,
            settings_directory: None,
            cache_feed_pages: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl ConfigFile {
    /// Load configuration defaults from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }
}
