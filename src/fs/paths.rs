//! Output tree layout.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::naming::sanitize_path_component;

/// Directory of one post: `<posts_dir>/<username>/<media_id>`.
///
/// Stable across runs, so re-running over the same feed finds earlier files.
pub fn post_dir(posts_dir: &Path, username: &str, media_id: &str) -> Result<PathBuf> {
    let username = sanitize_path_component(username)?;
    let media_id = sanitize_path_component(media_id)?;
    Ok(posts_dir.join(username).join(media_id))
}

/// Ensure a directory exists, creating it if necessary.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}
