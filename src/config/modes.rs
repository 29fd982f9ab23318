//! Feed mode definitions.

use std::fmt;

/// Where the saved feed comes from for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedMode {
    /// Page through the live feed, optionally caching every raw page.
    Network { cache_pages: bool },
    /// Replay previously cached pages without touching the network.
    Replay,
}

impl FeedMode {
    /// Resolve the mode from the command-line flags.
    ///
    /// Replaying wins over `--no-cache` since nothing is written in that mode.
    pub fn from_flags(from_cache: bool, no_cache: bool) -> Self {
        if from_cache {
            FeedMode::Replay
        } else {
            FeedMode::Network {
                cache_pages: !no_cache,
            }
        }
    }
}

impl fmt::Display for FeedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedMode::Network { cache_pages: true } => write!(f, "network (caching pages)"),
            FeedMode::Network { cache_pages: false } => write!(f, "network"),
            FeedMode::Replay => write!(f, "replay from cache"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        assert_eq!(
            FeedMode::from_flags(false, false),
            FeedMode::Network { cache_pages: true }
        );
        assert_eq!(
            FeedMode::from_flags(false, true),
            FeedMode::Network { cache_pages: false }
        );
        assert_eq!(FeedMode::from_flags(true, false), FeedMode::Replay);
        assert_eq!(FeedMode::from_flags(true, true), FeedMode::Replay);
    }
}
