//! On-disk cache of raw feed pages.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;

use crate::error::{Error, Result};

const PAGE_PREFIX: &str = "page_";
const PAGE_EXTENSION: &str = "json";

/// Directory of `page_<n>.json` files holding verbatim feed responses.
#[derive(Debug, Clone)]
pub struct PageCache {
    dir: PathBuf,
}

impl PageCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding page `index` (0-based).
    pub fn page_path(&self, index: usize) -> PathBuf {
        self.dir
            .join(format!("{}{}.{}", PAGE_PREFIX, index, PAGE_EXTENSION))
    }

    /// Prepare for a new fetch: create the directory and drop earlier pages.
    ///
    /// Returns the number of stale pages removed.
    pub async fn reset(&self) -> Result<usize> {
        fs::create_dir_all(&self.dir).await?;

        let mut removed = 0;
        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            if page_index(&name.to_string_lossy()).is_some() {
                fs::remove_file(entry.path()).await?;
                removed += 1;
            }
        }

        if removed > 0 {
            tracing::debug!("Removed {} stale cached pages from {}", removed, self.dir.display());
        }
        Ok(removed)
    }

    /// Write one raw page, pretty-printed.
    pub async fn write_page(&self, index: usize, page: &Value) -> Result<PathBuf> {
        let path = self.page_path(index);
        let content = serde_json::to_string_pretty(page)?;
        fs::write(&path, content).await?;
        tracing::debug!("Cached feed page {} at {}", index, path.display());
        Ok(path)
    }

    /// Read every cached page, ordered by page index.
    pub async fn read_all(&self) -> Result<Vec<Value>> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::Config(format!(
                    "No cached feed pages at {}; run once without --from-cache",
                    self.dir.display()
                )));
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(PAGE_EXTENSION) {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            files.push((page_index(&name), name, path));
        }
        // Numbered pages first in numeric order, anything else after by name.
        files.sort_by(|a, b| {
            (a.0.is_none(), a.0, &a.1).cmp(&(b.0.is_none(), b.0, &b.1))
        });

        let mut pages = Vec::with_capacity(files.len());
        for (_, _, path) in files {
            let content = fs::read_to_string(&path).await?;
            let page: Value = serde_json::from_str(&content)?;
            pages.push(page);
        }

        Ok(pages)
    }
}

/// Index of a `page_<n>.json` file name.
fn page_index(name: &str) -> Option<usize> {
    name.strip_prefix(PAGE_PREFIX)?
        .strip_suffix(PAGE_EXTENSION)?
        .strip_suffix('.')?
        .parse()
        .ok()
}
