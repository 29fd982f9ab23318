//! Instagram API module.
//!
//! This module provides:
//! - The `SessionClient` capability the downloader depends on
//! - Authentication bootstrap over stored settings
//! - HTTP client for the private mobile API
//! - Saved-feed response types

pub mod auth;
pub mod client;
pub mod session;
pub mod types;

pub use client::InstagramApi;
pub use session::{authenticate, Credentials, SessionClient, SessionOrigin};
pub use types::*;
