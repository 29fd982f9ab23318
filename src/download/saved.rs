//! Top-level pass over the saved feed.

use crate::api::{FeedPage, SavedItem};
use crate::download::media::MediaMaterializer;
use crate::download::stats::Stats;
use crate::output::print_status;

/// Materialize every item of every page, in feed order.
pub async fn download_saved(
    pages: &[FeedPage],
    total_posts: u64,
    materializer: &MediaMaterializer<'_>,
) -> Stats {
    let mut stats = Stats::new();
    let mut processed = 0u64;

    for page in pages {
        let page_len = page.items.len();
        for (index, item) in page.items.iter().enumerate() {
            let label = item_label(item);
            print_status(&format!("entering {} ({}/{})...", label, index + 1, page_len));
            processed += materializer.materialize(item, &mut stats).await as u64;
            print_status(&format!("exiting {}", label));
        }
        print_status(&format!("processed {}/{} posts", processed, total_posts));
    }

    tracing::debug!("Processed {} posts over {} pages", processed, pages.len());
    stats
}

fn item_label(item: &SavedItem) -> String {
    match &item.media {
        Some(media) => format!("{}/{}", media.user.username, media.id),
        None => "<no media>".to_string(),
    }
}
