//! Configuration module for the saved-downloader.
//!
//! This module handles:
//! - The explicit run configuration passed to every component
//! - Loading optional defaults from a TOML file
//! - Feed mode selection
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{Config, ConfigFile, OptionsConfig};
pub use modes::FeedMode;
pub use validation::{validate_account_name, validate_config};
