//! API response type definitions.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One page of the saved-items feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<SavedItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub num_results: u64,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub next_max_id: Option<String>,
}

impl FeedPage {
    /// Cursor for the following page, `None` once the feed is exhausted.
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_max_id.as_deref().filter(|cursor| !cursor.is_empty())
    }
}

/// A saved post as listed in the feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavedItem {
    #[serde(default)]
    pub media: Option<Media>,
}

/// Media of a saved post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Media {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: MediaUser,
    #[serde(default)]
    pub caption: Option<Caption>,
    #[serde(default)]
    pub image_versions2: Option<ImageVersions>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub video_versions: Vec<VideoVersion>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub carousel_media: Vec<CarouselMedia>,
}

impl Media {
    /// Caption text, if present and non-empty.
    pub fn caption_text(&self) -> Option<&str> {
        self.caption
            .as_ref()
            .and_then(|caption| caption.text.as_deref())
            .filter(|text| !text.is_empty())
    }
}

/// Owner of a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaUser {
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
}

/// Post caption.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Caption {
    #[serde(default)]
    pub text: Option<String>,
}

/// Image renditions of a post, best first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageVersions {
    #[serde(default, deserialize_with = "null_as_default")]
    pub candidates: Vec<ImageCandidate>,
}

/// One image rendition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageCandidate {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// One video rendition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoVersion {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(rename = "type", default)]
    pub kind: Option<i64>,
}

/// A sub-item of a carousel post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarouselMedia {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub image_versions2: Option<ImageVersions>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub video_versions: Vec<VideoVersion>,
}

/// Access to the downloadable renditions of a post or carousel sub-item.
///
/// The feed lists renditions best first, so the first entry is always chosen.
pub trait MediaVersions {
    fn image_url(&self) -> Option<&str>;
    fn video_url(&self) -> Option<&str>;
}

fn first_candidate(versions: &Option<ImageVersions>) -> Option<&str> {
    versions
        .as_ref()
        .and_then(|versions| versions.candidates.first())
        .map(|candidate| candidate.url.as_str())
}

impl MediaVersions for Media {
    fn image_url(&self) -> Option<&str> {
        first_candidate(&self.image_versions2)
    }

    fn video_url(&self) -> Option<&str> {
        self.video_versions.first().map(|version| version.url.as_str())
    }
}

impl MediaVersions for CarouselMedia {
    fn image_url(&self) -> Option<&str> {
        first_candidate(&self.image_versions2)
    }

    fn video_url(&self) -> Option<&str> {
        self.video_versions.first().map(|version| version.url.as_str())
    }
}

/// Login endpoint response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub logged_in_user: Option<LoggedInUser>,
    #[serde(default)]
    pub invalid_credentials: Option<bool>,
    #[serde(default)]
    pub two_factor_required: Option<bool>,
    #[serde(default)]
    pub error_type: Option<String>,
}

impl LoginResponse {
    /// Human-readable reason for a rejected login.
    pub fn failure_reason(&self) -> String {
        if self.two_factor_required == Some(true) {
            return "two-factor authentication required".to_string();
        }
        if self.invalid_credentials == Some(true) {
            return self
                .message
                .clone()
                .unwrap_or_else(|| "invalid credentials".to_string());
        }
        match (&self.message, &self.error_type) {
            (Some(message), Some(kind)) => format!("{} ({})", message, kind),
            (Some(message), None) => message.clone(),
            (None, Some(kind)) => kind.clone(),
            (None, None) => format!("unexpected status '{}'", self.status),
        }
    }
}

/// Account returned by a successful login.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggedInUser {
    #[serde(default, deserialize_with = "string_or_number")]
    pub pk: String,
    #[serde(default)]
    pub username: String,
}

/// Generic failure body (`{"status": "fail", "message": ...}`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Null => Ok(None),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_string_or_number(deserializer)?.unwrap_or_default())
}
