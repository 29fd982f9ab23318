//! File and directory naming.

use crate::error::{Error, Result};

/// Caption file written next to a post's media.
pub const CAPTION_FILE: &str = "caption.txt";

/// Kind of media file written for a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn extension(&self) -> &'static str {
        match self {
            MediaKind::Image => "jpg",
            MediaKind::Video => "mp4",
        }
    }

    /// File name of this kind of media for an id.
    pub fn filename(&self, media_id: &str) -> String {
        format!("{}.{}", media_id, self.extension())
    }
}

/// Identifier of a carousel sub-item, prefixed with its 1-based position.
pub fn carousel_media_id(index: usize, media_id: &str) -> String {
    format!("{}_{}", index + 1, media_id)
}

/// Sanitize a path component (folder or file name).
///
/// Separators and reserved characters are replaced; traversal and empty names
/// are rejected.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    // Reject path traversal attempts
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    // Reject null bytes
    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() || sanitized == "." {
        return Err(Error::InvalidFilename(
            "Path component cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}
