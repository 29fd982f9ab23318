//! Device identity and request signing utilities.

use chrono::Utc;
use md5::{Digest, Md5};
use serde_json::Value;
use uuid::Uuid;

/// Signature key version sent alongside signed bodies.
pub const SIG_KEY_VERSION: &str = "4";

/// Fixed salt mixed into the device identifier seed.
const VOLATILE_SEED: &str = "12345";

/// Identifiers the mobile API expects from a device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub device_id: String,
    pub uuid: String,
    pub phone_id: String,
    pub ad_id: String,
}

impl DeviceIdentity {
    /// Fresh identity around a known device identifier.
    pub fn new(device_id: String) -> Self {
        Self {
            device_id,
            uuid: generate_uuid(),
            phone_id: generate_uuid(),
            ad_id: generate_uuid(),
        }
    }
}

/// Derive a stable device identifier from the login credentials.
///
/// Format: `android-` + first 16 hex chars of md5(md5(username + password) + seed).
pub fn generate_device_id(username: &str, password: &str) -> String {
    let seed = md5_hex(&format!("{}{}", username, password));
    let hash = md5_hex(&format!("{}{}", seed, VOLATILE_SEED));
    format!("android-{}", &hash[..16])
}

fn md5_hex(input: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Generate a random v4 UUID string.
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Wrap a request body the way the mobile API accepts unsigned payloads.
pub fn sign_body(body: &Value) -> String {
    format!("SIGNATURE.{}", body)
}

/// Password envelope for the login endpoint (version 0 is plain text).
pub fn password_envelope(password: &str, timestamp: i64) -> String {
    format!("#PWD_INSTAGRAM:0:{}:{}", timestamp, password)
}

/// Current unix time in seconds.
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Check whether a stored session cookie has expired.
///
/// A missing expiry is treated as still valid; the server rejects it otherwise.
pub fn is_cookie_expired(expiry: Option<i64>, now: i64) -> bool {
    match expiry {
        Some(expiry) => expiry <= now,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_device_id_known_value() {
        assert_eq!(
            generate_device_id("alice", "hunter2"),
            "android-f309e4c7bad9374d"
        );
    }

    #[test]
    fn test_device_id_format() {
        let id = generate_device_id("bob", "secret");
        assert!(id.starts_with("android-"));
        assert_eq!(id.len(), "android-".len() + 16);
        assert!(id["android-".len()..].chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, generate_device_id("bob", "other"));
    }

    #[test]
    fn test_identity_keeps_device_id() {
        let identity = DeviceIdentity::new("android-0000000000000000".into());
        assert_eq!(identity.device_id, "android-0000000000000000");
        assert_ne!(identity.uuid, identity.phone_id);
    }

    #[test]
    fn test_sign_body() {
        let body = json!({"username": "alice"});
        assert_eq!(sign_body(&body), r#"SIGNATURE.{"username":"alice"}"#);
    }

    #[test]
    fn test_password_envelope() {
        assert_eq!(
            password_envelope("hunter2", 1_700_000_000),
            "#PWD_INSTAGRAM:0:1700000000:hunter2"
        );
    }

    #[test]
    fn test_cookie_expiry() {
        assert!(!is_cookie_expired(None, 100));
        assert!(!is_cookie_expired(Some(101), 100));
        assert!(is_cookie_expired(Some(100), 100));
        assert!(is_cookie_expired(Some(50), 100));
    }
}
