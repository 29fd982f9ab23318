//! Download module for materializing saved posts.
//!
//! This module provides:
//! - Media byte fetching
//! - Per-post caption and media materialization
//! - Outcome statistics
//! - The top-level pass over all feed pages

pub mod fetcher;
pub mod media;
pub mod saved;
pub mod stats;

pub use fetcher::{HttpFetcher, MediaFetcher};
pub use media::MediaMaterializer;
pub use saved::download_saved;
pub use stats::{Outcome, Stats, Summary};
