//! Paging through the saved feed.

use serde_json::Value;

use crate::api::{FeedPage, SessionClient};
use crate::error::Result;
use crate::feed::cache::PageCache;
use crate::output::create_spinner;

/// Items requested per feed page.
pub const PAGE_SIZE: u32 = 250;

/// Source of the complete saved feed.
pub enum FeedPager<'a> {
    /// Page through the live feed, caching raw pages when a cache is given.
    Network {
        client: &'a dyn SessionClient,
        cache: Option<PageCache>,
    },
    /// Rebuild the feed from previously cached pages.
    Replay { cache: PageCache },
}

impl<'a> FeedPager<'a> {
    pub fn network(client: &'a dyn SessionClient, cache: Option<PageCache>) -> Self {
        FeedPager::Network { client, cache }
    }

    pub fn replay(cache: PageCache) -> Self {
        FeedPager::Replay { cache }
    }

    /// Fetch every page, returning the pages holding items and the sum of the
    /// result counts the pages reported.
    pub async fn fetch_all(&self) -> Result<(Vec<FeedPage>, u64)> {
        match self {
            FeedPager::Network { client, cache } => {
                let spinner = create_spinner("Fetching saved feed...");
                let result = fetch_from_api(*client, cache.as_ref(), |index| {
                    spinner.set_message(format!("Fetching saved feed page {}...", index + 1));
                })
                .await;
                spinner.finish_and_clear();
                result
            }
            FeedPager::Replay { cache } => {
                let raw_pages = cache.read_all().await?;
                tracing::debug!(
                    "Replaying {} cached pages from {}",
                    raw_pages.len(),
                    cache.dir().display()
                );
                collect_pages(raw_pages)
            }
        }
    }
}

async fn fetch_from_api(
    client: &dyn SessionClient,
    cache: Option<&PageCache>,
    mut on_page: impl FnMut(usize),
) -> Result<(Vec<FeedPage>, u64)> {
    if let Some(cache) = cache {
        cache.reset().await?;
    }

    let mut pages = Vec::new();
    let mut total = 0u64;
    let mut cursor: Option<String> = None;
    let mut index = 0usize;

    loop {
        on_page(index);
        let raw = client.fetch_feed_page(cursor.as_deref(), PAGE_SIZE).await?;
        if let Some(cache) = cache {
            cache.write_page(index, &raw).await?;
        }
        index += 1;

        let page: FeedPage = serde_json::from_value(raw)?;
        total += page.num_results;
        cursor = page.next_cursor().map(str::to_string);
        tracing::debug!(
            "Feed page {}: {} items, next cursor {:?}",
            index,
            page.items.len(),
            cursor
        );
        push_page(&mut pages, page);

        if cursor.is_none() {
            break;
        }
    }

    Ok((pages, total))
}

fn collect_pages(raw_pages: Vec<Value>) -> Result<(Vec<FeedPage>, u64)> {
    let mut pages = Vec::with_capacity(raw_pages.len());
    let mut total = 0u64;

    for raw in raw_pages {
        let page: FeedPage = serde_json::from_value(raw)?;
        total += page.num_results;
        push_page(&mut pages, page);
    }

    Ok((pages, total))
}

/// Pages without items carry nothing to materialize and are dropped.
fn push_page(pages: &mut Vec<FeedPage>, page: FeedPage) {
    if !page.items.is_empty() {
        pages.push(page);
    }
}
