use std::fmt;

use serde::{Deserialize, Serialize};

/// A parsed option value: boolean for coerced flags, text otherwise.
///
/// Untagged so a serialized result reads naturally, e.g.
/// `{"verbose": true, "mode": "fast"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Flag(bool),
    Text(String),
}

impl ArgValue {
    /// Truthiness: flags report their boolean, text goes through
    /// [`is_truthy`].
    pub fn is_truthy(&self) -> bool {
        match self {
            ArgValue::Flag(value) => *value,
            ArgValue::Text(text) => is_truthy(text),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ArgValue::Text(text) => Some(text),
            ArgValue::Flag(_) => None,
        }
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Flag(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Text(value)
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Flag(value) => value.fmt(f),
            ArgValue::Text(text) => text.fmt(f),
        }
    }
}

/// The one truthiness rule used everywhere a raw string is read as a
/// switch: truthy iff non-empty and not exactly `"0"`.
pub fn is_truthy(text: &str) -> bool {
    !text.is_empty() && text != "0"
}
