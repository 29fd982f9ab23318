//! Error types for the saved-downloader application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // Session errors
    #[error("Login failed: {0}")]
    Login(String),

    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("Login required: {0}")]
    LoginRequired(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    // File system errors
    #[error("Invalid filename (path traversal attempt): {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether a cached session was rejected and a fresh login may recover it.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::SessionExpired(_) | Error::LoginRequired(_))
    }

    /// Process exit code for a fatal error.
    ///
    /// Only credential failures map to `LOGIN_ERROR`; API errors raised while
    /// signing in are converted to [`Error::Login`] by the bootstrap.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Login(_) => exit_codes::LOGIN_ERROR,
            _ => exit_codes::UNEXPECTED_ERROR,
        }
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USAGE_ERROR: i32 = 1;
    pub const LOGIN_ERROR: i32 = 9;
    pub const UNEXPECTED_ERROR: i32 = 99;
}
