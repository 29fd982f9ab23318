//! Test doubles for the session client and media fetcher.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::api::{Credentials, SessionClient};
use crate::download::MediaFetcher;
use crate::error::{Error, Result};
use crate::settings::Settings;

type ErrorFactory = Box<dyn Fn() -> Error + Send + Sync>;

/// Scripted `SessionClient` recording every call.
pub(crate) struct MockSessionClient {
    pages: Mutex<VecDeque<Value>>,
    feed_calls: Mutex<Vec<(Option<String>, u32)>>,
    login_calls: Mutex<Vec<Option<String>>>,
    resume_calls: Mutex<usize>,
    verify_calls: Mutex<usize>,
    login_error: Option<ErrorFactory>,
    resume_error: Option<ErrorFactory>,
    verify_error: Option<ErrorFactory>,
}

impl MockSessionClient {
    pub fn new() -> Self {
        Self {
            pages: Mutex::new(VecDeque::new()),
            feed_calls: Mutex::new(Vec::new()),
            login_calls: Mutex::new(Vec::new()),
            resume_calls: Mutex::new(0),
            verify_calls: Mutex::new(0),
            login_error: None,
            resume_error: None,
            verify_error: None,
        }
    }

    /// Raw pages returned by successive feed requests.
    pub fn with_pages(self, pages: Vec<Value>) -> Self {
        *self.pages.lock().unwrap() = pages.into();
        self
    }

    pub fn with_login_error(mut self, error: impl Fn() -> Error + Send + Sync + 'static) -> Self {
        self.login_error = Some(Box::new(error));
        self
    }

    pub fn with_resume_error(mut self, error: impl Fn() -> Error + Send + Sync + 'static) -> Self {
        self.resume_error = Some(Box::new(error));
        self
    }

    /// Error the server reports when a resumed session is checked.
    pub fn with_verify_error(mut self, error: impl Fn() -> Error + Send + Sync + 'static) -> Self {
        self.verify_error = Some(Box::new(error));
        self
    }

    /// Settings every successful login returns.
    pub fn login_settings(&self) -> Settings {
        let mut settings = Settings::new();
        settings.insert("device_id", "android-feedfacecafebeef");
        settings.insert("cookie", b"sessionid=fresh; csrftoken=tok".to_vec());
        settings.insert("created_ts", 1_700_000_000i64);
        settings
    }

    pub fn feed_calls(&self) -> Vec<(Option<String>, u32)> {
        self.feed_calls.lock().unwrap().clone()
    }

    /// Device ids passed to each login attempt.
    pub fn login_calls(&self) -> Vec<Option<String>> {
        self.login_calls.lock().unwrap().clone()
    }

    pub fn resume_calls(&self) -> usize {
        *self.resume_calls.lock().unwrap()
    }

    pub fn verify_calls(&self) -> usize {
        *self.verify_calls.lock().unwrap()
    }
}

#[async_trait]
impl SessionClient for MockSessionClient {
    async fn login(&self, _credentials: &Credentials, device_id: Option<&str>) -> Result<Settings> {
        self.login_calls
            .lock()
            .unwrap()
            .push(device_id.map(str::to_string));
        match &self.login_error {
            Some(error) => Err(error()),
            None => Ok(self.login_settings()),
        }
    }

    async fn resume_session(&self, _settings: &Settings) -> Result<()> {
        *self.resume_calls.lock().unwrap() += 1;
        match &self.resume_error {
            Some(error) => Err(error()),
            None => Ok(()),
        }
    }

    async fn verify_session(&self) -> Result<()> {
        *self.verify_calls.lock().unwrap() += 1;
        match &self.verify_error {
            Some(error) => Err(error()),
            None => Ok(()),
        }
    }

    async fn fetch_feed_page(&self, cursor: Option<&str>, count: u32) -> Result<Value> {
        self.feed_calls
            .lock()
            .unwrap()
            .push((cursor.map(str::to_string), count));
        self.pages.lock().unwrap().pop_front().ok_or(Error::Api {
            status: 500,
            message: "no more scripted pages".to_string(),
        })
    }
}

/// `MediaFetcher` returning each URL's own bytes unless told to fail.
pub(crate) struct MockFetcher {
    media: Vec<(String, Vec<u8>)>,
    failures: HashSet<String>,
    interruptions: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            media: Vec::new(),
            failures: HashSet::new(),
            interruptions: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_media(mut self, url: &str, bytes: &[u8]) -> Self {
        self.media.push((url.to_string(), bytes.to_vec()));
        self
    }

    pub fn with_failure(mut self, url: &str) -> Self {
        self.failures.insert(url.to_string());
        self
    }

    /// Writes part of the body for `url`, then fails.
    pub fn with_interruption(mut self, url: &str) -> Self {
        self.interruptions.insert(url.to_string());
        self
    }

    /// URLs fetched so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaFetcher for MockFetcher {
    async fn fetch_into(
        &self,
        url: &str,
        sink: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<u64> {
        self.calls.lock().unwrap().push(url.to_string());

        if self.failures.contains(url) {
            return Err(Error::Download("connection reset by peer".to_string()));
        }

        let bytes = self
            .media
            .iter()
            .find(|(known, _)| known == url)
            .map(|(_, bytes)| bytes.clone())
            .unwrap_or_else(|| url.as_bytes().to_vec());

        if self.interruptions.contains(url) {
            sink.write_all(&bytes[..bytes.len() / 2]).await?;
            return Err(Error::Download("stream closed early".to_string()));
        }

        sink.write_all(&bytes).await?;
        Ok(bytes.len() as u64)
    }
}
