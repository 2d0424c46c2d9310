// src/document.rs

use crate::error::{ConfigError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// The raw remote configuration document, one per fetch attempt.
///
/// Decoding is lenient on purpose: any field may be missing or carry the
/// wrong JSON type, and a mismatched field is treated exactly like an
/// absent one. Only a body that is not a JSON object at all is rejected.
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigDocument {
    pub home_url: Option<String>,
    pub user_agent: Option<String>,
    pub show_share_options: Option<bool>,
    pub external_app_url: Option<String>,
    /// Informational only, surfaced through the inspector snapshot.
    pub version: Option<i64>,
}

impl ConfigDocument {
    /// Decode a response body into a document.
    pub fn decode(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        let Value::Object(obj) = value else {
            return Err(ConfigError::decode("response body is not a JSON object"));
        };
        Ok(Self::from_object(&obj))
    }

    fn from_object(obj: &Map<String, Value>) -> Self {
        Self {
            home_url: string_field(obj, "home_url"),
            user_agent: string_field(obj, "user_agent"),
            show_share_options: obj.get("show_share_options").and_then(Value::as_bool),
            external_app_url: string_field(obj, "external_app_url"),
            version: obj.get("version").and_then(Value::as_i64),
        }
    }

    /// True when no field survived decoding.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_owned)
}
