//! Setting values and their JSON representation.

use std::collections::BTreeMap;

use base64::{engine::general_purpose, Engine as _};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tag key marking a wrapped value.
const CLASS_KEY: &str = "__class__";

/// Payload key of a wrapped value.
const VALUE_KEY: &str = "__value__";

/// Tag of a wrapped binary value.
const BYTES_CLASS: &str = "bytes";

/// A single settings value.
///
/// On disk, `Bytes` is written as `{"__class__": "bytes", "__value__": <base64>}`,
/// `Text` as a JSON string and `Json` verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Text(String),
    Bytes(Vec<u8>),
    /// Any other JSON value (numbers, booleans, nested objects), passed through.
    Json(Value),
}

impl SettingValue {
    /// Classify a decoded JSON value.
    pub fn from_json(value: Value) -> std::result::Result<Self, base64::DecodeError> {
        match value {
            Value::String(text) => Ok(SettingValue::Text(text)),
            Value::Object(map)
                if map.get(CLASS_KEY).and_then(Value::as_str) == Some(BYTES_CLASS) =>
            {
                let encoded = map.get(VALUE_KEY).and_then(Value::as_str).unwrap_or_default();
                // Line-wrapped base64 (76 columns plus trailing newline) is common in older files.
                let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
                let bytes = general_purpose::STANDARD.decode(compact)?;
                Ok(SettingValue::Bytes(bytes))
            }
            other => Ok(SettingValue::Json(other)),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            SettingValue::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SettingValue::Json(value) => value.as_i64(),
            _ => None,
        }
    }
}

impl From<&str> for SettingValue {
    fn from(text: &str) -> Self {
        SettingValue::Text(text.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(text: String) -> Self {
        SettingValue::Text(text)
    }
}

impl From<Vec<u8>> for SettingValue {
    fn from(bytes: Vec<u8>) -> Self {
        SettingValue::Bytes(bytes)
    }
}

impl From<i64> for SettingValue {
    fn from(number: i64) -> Self {
        SettingValue::Json(Value::from(number))
    }
}

impl Serialize for SettingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            SettingValue::Text(text) => serializer.serialize_str(text),
            SettingValue::Bytes(bytes) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry(CLASS_KEY, BYTES_CLASS)?;
                map.serialize_entry(VALUE_KEY, &general_purpose::STANDARD.encode(bytes))?;
                map.end()
            }
            SettingValue::Json(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for SettingValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        SettingValue::from_json(value).map_err(de::Error::custom)
    }
}

/// Session settings keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(BTreeMap<String, SettingValue>);

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(SettingValue::as_text)
    }

    pub fn bytes(&self, key: &str) -> Option<&[u8]> {
        self.get(key).and_then(SettingValue::as_bytes)
    }

    pub fn number(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(SettingValue::as_i64)
    }

    /// Device identifier stored by a previous login.
    pub fn device_id(&self) -> Option<&str> {
        self.text("device_id")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bytes_round_trip() {
        let blob: Vec<u8> = (0u8..=255).chain([0, 0, 10, 13]).collect();
        let mut settings = Settings::new();
        settings.insert("cookie", blob.clone());
        settings.insert("device_id", "android-0123456789abcdef");
        settings.insert("created_ts", 1_700_000_000i64);

        let encoded = serde_json::to_string(&settings).unwrap();
        let decoded: Settings = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded.bytes("cookie"), Some(blob.as_slice()));
        assert_eq!(decoded, settings);
    }

    #[test]
    fn test_bytes_wire_format() {
        let mut settings = Settings::new();
        settings.insert("cookie", b"sessionid=abc".to_vec());

        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(
            value,
            json!({"cookie": {"__class__": "bytes", "__value__": "c2Vzc2lvbmlkPWFiYw=="}})
        );
    }

    #[test]
    fn test_decodes_line_wrapped_base64() {
        let raw = r#"{"cookie": {"__class__": "bytes", "__value__": "c2Vzc2lv\nbmlkPWFiYw==\n"}}"#;
        let settings: Settings = serde_json::from_str(raw).unwrap();
        assert_eq!(settings.bytes("cookie"), Some(&b"sessionid=abc"[..]));
    }

    #[test]
    fn test_other_values_pass_through() {
        let raw = json!({
            "uuid": "1234",
            "created_ts": 1700000000,
            "flag": true,
            "nested": {"a": [1, 2]},
            "other_class": {"__class__": "set", "__value__": []}
        });
        let settings: Settings = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(settings.text("uuid"), Some("1234"));
        assert_eq!(settings.number("created_ts"), Some(1_700_000_000));
        assert_eq!(settings.get("flag"), Some(&SettingValue::Json(json!(true))));
        assert_eq!(serde_json::to_value(&settings).unwrap(), raw);
    }

    #[test]
    fn test_invalid_base64_is_rejected() {
        let raw = r#"{"cookie": {"__class__": "bytes", "__value__": "!!not base64!!"}}"#;
        assert!(serde_json::from_str::<Settings>(raw).is_err());
    }
}
