//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Saved posts downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "saved-downloader",
    version,
    about = "Download the media of your saved Instagram posts",
    long_about = "Logs in to an Instagram account, pages through its saved posts and stores \
                  every caption, photo and video under saved/<account>/posts.\n\n\
                  Files that already exist are skipped, so re-running only fetches new posts."
)]
pub struct Args {
    /// Account whose saved posts are downloaded.
    pub account: String,

    /// Replay previously cached feed pages instead of fetching the feed.
    #[arg(long)]
    pub from_cache: bool,

    /// Don't write fetched feed pages to the cache directory.
    #[arg(long)]
    pub no_cache: bool,

    /// Root directory of the output tree.
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Directory holding per-account session settings.
    #[arg(long = "settings-dir")]
    pub settings_dir: Option<PathBuf>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "saved-downloader.toml")]
    pub config: PathBuf,

    /// Account password. Prompted for when not given.
    #[arg(long, env = "IG_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        config.account_name = self.account.clone();

        if let Some(dir) = &self.output_dir {
            config.output_root = dir.clone();
        }

        if let Some(dir) = &self.settings_dir {
            config.settings_dir = dir.clone();
        }

        // Boolean flags (only override if set to non-default)
        if self.from_cache {
            config.replay_from_cache = true;
        }

        if self.no_cache {
            config.cache_enabled = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedMode;

    #[test]
    fn test_parse_minimal() {
        let args = Args::try_parse_from(["saved-downloader", "alice"]).unwrap();
        assert_eq!(args.account, "alice");
        assert!(!args.from_cache);
        assert!(!args.no_cache);
        assert_eq!(args.config, PathBuf::from("saved-downloader.toml"));
    }

    #[test]
    fn test_missing_account_is_an_error() {
        let err = Args::try_parse_from(["saved-downloader"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_merge_flags() {
        let args = Args::try_parse_from([
            "saved-downloader",
            "alice",
            "--no-cache",
            "-o",
            "/archive",
            "--settings-dir",
            "/secrets",
        ])
        .unwrap();

        let mut config = Config::new("placeholder");
        args.merge_into_config(&mut config);

        assert_eq!(config.account_name, "alice");
        assert_eq!(config.output_root, PathBuf::from("/archive"));
        assert_eq!(config.settings_dir, PathBuf::from("/secrets"));
        assert_eq!(config.feed_mode(), FeedMode::Network { cache_pages: false });
    }

    #[test]
    fn test_from_cache_selects_replay() {
        let args = Args::try_parse_from(["saved-downloader", "alice", "--from-cache"]).unwrap();
        let mut config = Config::new("alice");
        args.merge_into_config(&mut config);
        assert_eq!(config.feed_mode(), FeedMode::Replay);
    }
}
