//! Session settings persistence.
//!
//! Settings are an opaque key/value mapping produced by the session client on
//! login. Binary values survive the JSON round trip through a tagged wrapper.

pub mod store;
pub mod value;

pub use store::SettingsStore;
pub use value::{SettingValue, Settings};
