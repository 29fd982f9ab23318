//! Saved feed module.
//!
//! Provides:
//! - Paging through the live saved feed
//! - Caching raw pages to disk and replaying them

pub mod cache;
pub mod pager;

pub use cache::PageCache;
pub use pager::{FeedPager, PAGE_SIZE};
