//! Writing a saved post's caption and media files to disk.

use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::api::{MediaVersions, SavedItem};
use crate::download::fetcher::MediaFetcher;
use crate::download::stats::{Outcome, Stats};
use crate::error::Result;
use crate::fs::{
    carousel_media_id, ensure_dir, post_dir, sanitize_path_component, MediaKind, CAPTION_FILE,
};
use crate::output::{print_error, print_status, print_status_err, print_warning};

/// Suffix of a file that is still being written.
const PARTIAL_SUFFIX: &str = ".part";

/// Materializes saved posts under `<posts_dir>/<username>/<media_id>/`.
pub struct MediaMaterializer<'a> {
    fetcher: &'a dyn MediaFetcher,
    posts_dir: PathBuf,
}

impl<'a> MediaMaterializer<'a> {
    pub fn new(fetcher: &'a dyn MediaFetcher, posts_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            posts_dir: posts_dir.into(),
        }
    }

    /// Write one saved post, recording an outcome per attempted media file.
    ///
    /// Errors never escape: a failed file is counted and the remaining files of
    /// the post are still attempted. Returns the number of posts handled (1).
    pub async fn materialize(&self, item: &SavedItem, stats: &mut Stats) -> usize {
        let Some(media) = &item.media else {
            print_warning("Skipping saved item without media");
            return 1;
        };

        let dir = match post_dir(&self.posts_dir, &media.user.username, &media.id) {
            Ok(dir) => dir,
            Err(e) => {
                print_error(&format!(
                    "Skipping {}/{}: {}",
                    media.user.username, media.id, e
                ));
                return 1;
            }
        };

        // Failures here surface again as failed media writes below.
        if let Err(e) = ensure_dir(&dir).await {
            tracing::warn!("Failed to create {}: {}", dir.display(), e);
        }

        if let Some(text) = media.caption_text() {
            if let Err(e) = fs::write(dir.join(CAPTION_FILE), text.as_bytes()).await {
                print_warning(&format!("Failed to write caption for {}: {}", media.id, e));
            }
        }

        self.materialize_versions(&dir, &media.id, media, stats).await;

        for (index, sub_media) in media.carousel_media.iter().enumerate() {
            let sub_id = carousel_media_id(index, &sub_media.id);
            self.materialize_versions(&dir, &sub_id, sub_media, stats)
                .await;
        }

        1
    }

    /// Video first, then image; absent renditions are not attempts.
    async fn materialize_versions<V>(
        &self,
        dir: &Path,
        media_id: &str,
        versions: &V,
        stats: &mut Stats,
    ) where
        V: MediaVersions + Sync,
    {
        if let Some(url) = versions.video_url() {
            let outcome = self.save_media(dir, media_id, MediaKind::Video, url).await;
            stats.record(outcome);
        }

        if let Some(url) = versions.image_url() {
            let outcome = self.save_media(dir, media_id, MediaKind::Image, url).await;
            stats.record(outcome);
        }
    }

    /// Fetch one media file unless it is already on disk.
    async fn save_media(
        &self,
        dir: &Path,
        media_id: &str,
        kind: MediaKind,
        url: &str,
    ) -> Outcome {
        let path = match sanitize_path_component(&kind.filename(media_id)) {
            Ok(filename) => dir.join(filename),
            Err(e) => {
                print_status_err(&format!("    failed media_id={}: {}", media_id, e));
                return Outcome::Failed;
            }
        };

        if fs::try_exists(&path).await.unwrap_or(false) {
            print_status(&format!("    skip '{}'", path.display()));
            return Outcome::Cached;
        }

        if url.is_empty() {
            print_status_err(&format!("    failed media_id={}: missing media URL", media_id));
            return Outcome::Failed;
        }

        match self.download_to(url, &path).await {
            Ok(()) => {
                print_status(&format!("    saved '{}'", path.display()));
                Outcome::New
            }
            Err(e) => {
                print_status_err(&format!("    failed media_id={}: {}", media_id, e));
                Outcome::Failed
            }
        }
    }

    /// Download into a partial file and move it into place once complete.
    async fn download_to(&self, url: &str, path: &Path) -> Result<()> {
        let partial = partial_path(path);

        match self.stream_to_file(url, &partial).await {
            Ok(written) => tracing::debug!("Wrote {} bytes to {}", written, partial.display()),
            Err(e) => {
                let _ = fs::remove_file(&partial).await;
                return Err(e);
            }
        }
        fs::rename(&partial, path).await?;

        Ok(())
    }

    async fn stream_to_file(&self, url: &str, path: &Path) -> Result<u64> {
        let mut file = fs::File::create(path).await?;
        let written = self.fetcher.fetch_into(url, &mut file).await?;
        file.flush().await?;
        Ok(written)
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}
