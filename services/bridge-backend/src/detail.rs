use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// The payload attached to an error, which ends up in the `detail` field of the error body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Detail {
    /// A structured payload, typically the parsed JSON body of an upstream response.
    Json(Value),
    /// A raw text payload.
    Text(String),
}

impl Detail {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Detail::Json(value) => Some(value),
            Detail::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Detail::Json(_) => None,
            Detail::Text(text) => Some(text),
        }
    }
}

impl fmt::Display for Detail {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detail::Json(value) => write!(fmt, "{value}"),
            Detail::Text(text) => write!(fmt, "{text}"),
        }
    }
}

impl From<Value> for Detail {
    fn from(value: Value) -> Self {
        Detail::Json(value)
    }
}

impl From<String> for Detail {
    fn from(text: String) -> Self {
        Detail::Text(text)
    }
}

impl From<&str> for Detail {
    fn from(text: &str) -> Self {
        Detail::Text(text.to_string())
    }
}
