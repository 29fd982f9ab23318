//! Filesystem module.
//!
//! Provides:
//! - Output tree layout
//! - File naming and path-component sanitising

pub mod naming;
pub mod paths;

pub use naming::{carousel_media_id, sanitize_path_component, MediaKind, CAPTION_FILE};
pub use paths::{ensure_dir, post_dir};
