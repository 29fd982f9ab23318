//! Session capability and authentication bootstrap.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::output::{print_status, print_status_err};
use crate::settings::{Settings, SettingsStore};

/// Capabilities the downloader needs from an authenticated API client.
#[async_trait]
pub trait SessionClient: Send + Sync {
    /// Log in with a password, returning the settings to persist.
    ///
    /// `device_id` re-uses the identifier of an earlier session when known.
    async fn login(&self, credentials: &Credentials, device_id: Option<&str>) -> Result<Settings>;

    /// Restore a session from stored settings.
    async fn resume_session(&self, settings: &Settings) -> Result<()>;

    /// Ask the server whether a restored session is still accepted.
    async fn verify_session(&self) -> Result<()>;

    /// Whether an error means the stored session is no longer usable.
    fn is_session_expired(&self, error: &Error) -> bool {
        error.is_session_expired()
    }

    /// Fetch one raw page of the saved feed.
    async fn fetch_feed_page(&self, cursor: Option<&str>, count: u32) -> Result<Value>;
}

/// Login credentials for one account.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// How a session was established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOrigin {
    /// No stored settings existed; logged in with the password.
    FreshLogin,
    /// Stored settings were accepted.
    Resumed,
    /// Stored settings were rejected; logged in again with the stored device id.
    Relogin,
}

/// Bring a client to the authenticated state.
///
/// Stored settings are tried first and checked against the server. A session
/// rejected as expired, either locally or by the server, is discarded once in
/// favour of a fresh login; any other error is fatal. Rejections by the API
/// during this phase surface as [`Error::Login`].
pub async fn authenticate(
    client: &dyn SessionClient,
    store: &SettingsStore,
    credentials: &Credentials,
) -> Result<SessionOrigin> {
    establish(client, store, credentials)
        .await
        .map_err(into_login_error)
}

async fn establish(
    client: &dyn SessionClient,
    store: &SettingsStore,
    credentials: &Credentials,
) -> Result<SessionOrigin> {
    let account = credentials.username.as_str();
    let settings_path = store.path_for(account);

    let Some(cached) = store.load(account).await? else {
        print_status(&format!("Unable to find file: {}", settings_path.display()));
        fresh_login(client, store, credentials, None).await?;
        return Ok(SessionOrigin::FreshLogin);
    };

    print_status(&format!("Reusing settings: {}", settings_path.display()));
    let resumed = match client.resume_session(&cached).await {
        Ok(()) => client.verify_session().await,
        Err(e) => Err(e),
    };

    match resumed {
        Ok(()) => Ok(SessionOrigin::Resumed),
        Err(e) if client.is_session_expired(&e) => {
            print_status_err(&format!("Stored session rejected, logging in again: {}", e));
            fresh_login(client, store, credentials, cached.device_id()).await?;
            Ok(SessionOrigin::Relogin)
        }
        Err(e) => Err(e),
    }
}

/// API and transport failures while signing in are credential failures.
fn into_login_error(error: Error) -> Error {
    match error {
        Error::Api { status, message } => Error::Login(format!("HTTP {}: {}", status, message)),
        Error::Http(e) => Error::Login(e.to_string()),
        other => other,
    }
}

async fn fresh_login(
    client: &dyn SessionClient,
    store: &SettingsStore,
    credentials: &Credentials,
    device_id: Option<&str>,
) -> Result<()> {
    let settings = client.login(credentials, device_id).await?;
    let path = store.save(&credentials.username, &settings).await?;
    print_status(&format!("SAVED: {}", path.display()));
    Ok(())
}
