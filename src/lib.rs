//! Saved Downloader - archive the media of saved Instagram posts.
//!
//! This library logs in to an account, pages through its saved-items feed and
//! writes each post's caption, photos and videos to local disk, skipping files
//! that already exist so runs are incremental.
//!
//! # Features
//!
//! - Session settings persisted per account, with automatic re-login
//! - Saved feed paging with optional raw page caching and offline replay
//! - Carousel posts, one file per sub-item
//! - New / cached / failed statistics per run
//!
//! # Example
//!
//! ```no_run
//! use saved_downloader::{
//!     authenticate, download_saved, Credentials, FeedPager, HttpFetcher, InstagramApi,
//!     MediaMaterializer, PageCache, SettingsStore,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = InstagramApi::new()?;
//!     let store = SettingsStore::new("cookies");
//!     authenticate(&api, &store, &Credentials::new("alice", "hunter2")).await?;
//!
//!     let cache = PageCache::new("saved/alice/json");
//!     let (pages, total) = FeedPager::network(&api, Some(cache)).fetch_all().await?;
//!
//!     let fetcher = HttpFetcher::new()?;
//!     let materializer = MediaMaterializer::new(&fetcher, "saved/alice/posts");
//!     let stats = download_saved(&pages, total, &materializer).await;
//!     println!("{:?}", stats.summary());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod feed;
pub mod fs;
pub mod output;
pub mod settings;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use api::{authenticate, Credentials, FeedPage, InstagramApi, SavedItem, SessionClient};
pub use config::{Config, FeedMode};
pub use download::{download_saved, HttpFetcher, MediaFetcher, MediaMaterializer, Outcome, Stats};
pub use error::{Error, Result};
pub use feed::{FeedPager, PageCache};
pub use settings::{SettingValue, Settings, SettingsStore};
