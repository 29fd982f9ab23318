//! Instagram private API HTTP client.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{header, Client, Response, StatusCode};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use url::Url;

use crate::api::auth::{
    generate_device_id, generate_uuid, is_cookie_expired, now_timestamp, password_envelope,
    sign_body, DeviceIdentity, SIG_KEY_VERSION,
};
use crate::api::session::{Credentials, SessionClient};
use crate::api::types::{LoginResponse, StatusResponse};
use crate::error::{Error, Result};
use crate::settings::Settings;

/// Mobile API base URL.
const API_BASE: &str = "https://i.instagram.com/api/v1/";

/// Domain the session cookies are scoped to.
const COOKIE_DOMAIN: &str = ".instagram.com";

/// Android app user agent.
pub const USER_AGENT: &str = "Instagram 269.0.0.18.75 Android (26/8.0.0; 480dpi; 1080x1920; \
                              OnePlus; 6T Dev; devitron; qcom; en_US; 314665256)";

const APP_ID: &str = "567067343352427";

const CAPABILITIES: &str = "3brTvw==";

/// Session cookie that proves a login.
const SESSION_COOKIE: &str = "sessionid";

/// Maximum bytes of a failing response body kept in error messages.
const ERROR_BODY_LIMIT: usize = 500;

/// Instagram API client with cookie-based session management.
pub struct InstagramApi {
    client: Client,
    base: Url,
    jar: Arc<Jar>,
    identity: RwLock<Option<DeviceIdentity>>,
}

impl InstagramApi {
    /// Create an unauthenticated client.
    pub fn new() -> Result<Self> {
        let jar = Arc::new(Jar::default());

        let mut headers = header::HeaderMap::new();
        headers.insert("X-IG-App-ID", header::HeaderValue::from_static(APP_ID));
        headers.insert("X-IG-Capabilities", header::HeaderValue::from_static(CAPABILITIES));
        headers.insert("X-IG-Connection-Type", header::HeaderValue::from_static("WIFI"));
        headers.insert(header::ACCEPT_LANGUAGE, header::HeaderValue::from_static("en-US"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .cookie_provider(jar.clone())
            .build()?;

        Ok(Self {
            client,
            base: Url::parse(API_BASE)?,
            jar,
            identity: RwLock::new(None),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }

    /// Current `Cookie` header for the API domain.
    fn cookie_header(&self) -> Option<String> {
        self.jar
            .cookies(&self.base)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    fn csrf_token(&self) -> Option<String> {
        let header = self.cookie_header()?;
        let (_, token) = cookie_pairs(&header).find(|(name, _)| *name == "csrftoken")?;
        Some(token.to_string())
    }

    /// Prime the cookie jar with a CSRF token.
    async fn fetch_csrf_token(&self, identity: &DeviceIdentity) -> Result<String> {
        let url = self.endpoint("si/fetch_headers/")?;
        let guid = identity.uuid.replace('-', "");
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .query(&[("challenge_type", "signup"), ("guid", guid.as_str())])
            .send()
            .await?;
        tracing::debug!("Response status: {}", response.status());

        // A missing token is tolerated; the login endpoint reports the problem itself.
        Ok(self.csrf_token().unwrap_or_else(|| "missing".to_string()))
    }

    /// Snapshot of the current session as persistable settings.
    fn build_settings(&self, identity: &DeviceIdentity, cookie_expiry: Option<i64>) -> Settings {
        let mut settings = Settings::new();
        settings.insert("device_id", identity.device_id.as_str());
        settings.insert("uuid", identity.uuid.as_str());
        settings.insert("phone_id", identity.phone_id.as_str());
        settings.insert("ad_id", identity.ad_id.as_str());
        settings.insert("user_agent", USER_AGENT);
        settings.insert("created_ts", now_timestamp());
        if let Some(cookie) = self.cookie_header() {
            settings.insert("cookie", cookie.into_bytes());
        }
        if let Some(expiry) = cookie_expiry {
            settings.insert("cookie_expiry", expiry);
        }
        settings
    }
}

#[async_trait]
impl SessionClient for InstagramApi {
    async fn login(&self, credentials: &Credentials, device_id: Option<&str>) -> Result<Settings> {
        let device_id = device_id
            .map(str::to_string)
            .unwrap_or_else(|| generate_device_id(&credentials.username, &credentials.password));
        let identity = DeviceIdentity::new(device_id);

        let csrf_token = self.fetch_csrf_token(&identity).await?;
        let body = json!({
            "username": credentials.username,
            "enc_password": password_envelope(&credentials.password, now_timestamp()),
            "device_id": identity.device_id,
            "guid": identity.uuid,
            "phone_id": identity.phone_id,
            "adid": identity.ad_id,
            "_csrftoken": csrf_token,
            "login_attempt_count": "0",
        });
        let form = [
            ("signed_body", sign_body(&body)),
            ("ig_sig_key_version", SIG_KEY_VERSION.to_string()),
        ];

        let url = self.endpoint("accounts/login/")?;
        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .header("X-CSRFToken", csrf_token.as_str())
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);
        let cookie_expiry = session_cookie_expiry(&response);
        let text = response.text().await?;

        let login: LoginResponse = serde_json::from_str(&text).map_err(|e| Error::Api {
            status: status.as_u16(),
            message: format!(
                "Failed to parse login response: {} - Response: {}",
                e,
                truncate(&text)
            ),
        })?;

        if status.is_success() && login.logged_in_user.is_some() {
            let settings = self.build_settings(&identity, cookie_expiry);
            *self.identity.write().await = Some(identity);
            return Ok(settings);
        }

        if status == StatusCode::BAD_REQUEST || login.status == "fail" {
            return Err(Error::Login(login.failure_reason()));
        }

        Err(Error::Api {
            status: status.as_u16(),
            message: login.failure_reason(),
        })
    }

    async fn resume_session(&self, settings: &Settings) -> Result<()> {
        let device_id = settings
            .device_id()
            .ok_or_else(|| Error::LoginRequired("stored settings lack a device id".into()))?;
        let cookie = settings
            .bytes("cookie")
            .ok_or_else(|| Error::LoginRequired("stored settings lack cookies".into()))?;
        let cookie = std::str::from_utf8(cookie)
            .map_err(|_| Error::LoginRequired("stored cookies are unreadable".into()))?;

        if !cookie_pairs(cookie).any(|(name, _)| name == SESSION_COOKIE) {
            return Err(Error::LoginRequired("no session cookie stored".into()));
        }
        if is_cookie_expired(settings.number("cookie_expiry"), now_timestamp()) {
            return Err(Error::SessionExpired("session cookie has expired".into()));
        }

        for (name, value) in cookie_pairs(cookie) {
            let cookie = format!("{}={}; Domain={}; Path=/", name, value, COOKIE_DOMAIN);
            self.jar.add_cookie_str(&cookie, &self.base);
        }

        let text_or_new = |key: &str| {
            settings
                .text(key)
                .map(str::to_string)
                .unwrap_or_else(generate_uuid)
        };
        let identity = DeviceIdentity {
            device_id: device_id.to_string(),
            uuid: text_or_new("uuid"),
            phone_id: text_or_new("phone_id"),
            ad_id: text_or_new("ad_id"),
        };
        *self.identity.write().await = Some(identity);

        Ok(())
    }

    async fn verify_session(&self) -> Result<()> {
        let url = self.endpoint("accounts/current_user/")?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).query(&[("edit", "true")]).send().await?;
        let status = response.status();
        tracing::debug!("Response status: {}", status);
        let text = response.text().await?;

        check_response_status(status, &text)
    }

    async fn fetch_feed_page(&self, cursor: Option<&str>, count: u32) -> Result<Value> {
        let url = self.endpoint("feed/saved/")?;
        let mut request = self.client.get(url).query(&[("count", count.to_string())]);
        if let Some(cursor) = cursor {
            request = request.query(&[("max_id", cursor)]);
        }
        if let Some(identity) = self.identity.read().await.as_ref() {
            request = request.header("X-IG-Android-ID", identity.device_id.as_str());
        }

        tracing::debug!("GET feed/saved/ (max_id={:?})", cursor);
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Response status: {}", status);
        let text = response.text().await?;

        check_response_status(status, &text)?;

        serde_json::from_str(&text).map_err(|e| Error::Api {
            status: status.as_u16(),
            message: format!(
                "Failed to parse saved feed: {} - Response: {}",
                e,
                truncate(&text)
            ),
        })
    }
}

/// Classify an API response by status code and failure body.
fn check_response_status(status: StatusCode, text: &str) -> Result<()> {
    let failure: Option<StatusResponse> = serde_json::from_str(text).ok();
    let message = failure
        .as_ref()
        .and_then(|body| body.message.clone())
        .unwrap_or_else(|| truncate(text).to_string());

    if message == "login_required" || status == StatusCode::FORBIDDEN {
        return Err(Error::LoginRequired(message));
    }

    let failed = failure.map(|body| body.status == "fail").unwrap_or(false);
    if !status.is_success() || failed {
        return Err(Error::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(())
}

/// Split a `Cookie` header into name/value pairs.
fn cookie_pairs(header: &str) -> impl Iterator<Item = (&str, &str)> {
    header.split(';').filter_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        let name = name.trim();
        (!name.is_empty()).then_some((name, value.trim()))
    })
}

/// Expiry (unix seconds) of the session cookie set by a response.
fn session_cookie_expiry(response: &Response) -> Option<i64> {
    let cookie = response
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)?;

    let expires_at = match cookie.max_age() {
        Some(max_age) => SystemTime::now().checked_add(max_age),
        None => cookie.expires(),
    }?;

    expires_at
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|elapsed: Duration| elapsed.as_secs() as i64)
}

fn truncate(text: &str) -> &str {
    match text.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
