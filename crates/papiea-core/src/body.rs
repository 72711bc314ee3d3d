//! Wire shape of Papiea error bodies
//!
//! Bodies look like `{ "error": { "type": ..., "errors": [{ "message": ... }] } }`
//! but nothing guarantees it, so every accessor here is best-effort and
//! never fails on an unexpected shape.

use serde::Serialize;
use serde_json::Value;

/// Diagnostic payload captured from a failed response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorDetails {
    /// Body parsed as JSON
    Json(Value),
    /// Body that was not valid JSON, kept verbatim
    Raw(String),
}

impl ErrorDetails {
    /// Parse a body, keeping the raw text when it is not JSON
    pub fn parse(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Raw(text),
        }
    }

    /// Parsed body, if the body was JSON
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Raw(_) => None,
        }
    }

    /// Raw text, if the body was not JSON
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Raw(text) => Some(text),
        }
    }

    /// The nested `error` object of a parsed body
    pub fn error(&self) -> Option<ErrorPayload<'_>> {
        self.as_json().and_then(ErrorPayload::from_body)
    }

    /// Details as a JSON value, raw text becoming a JSON string
    pub fn to_value(&self) -> Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Raw(text) => Value::String(text.clone()),
        }
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Raw(text) => f.write_str(text),
        }
    }
}

/// Borrowed view over the `error` field of a parsed body
#[derive(Debug, Clone, Copy)]
pub struct ErrorPayload<'a> {
    value: &'a Value,
}

impl<'a> ErrorPayload<'a> {
    /// View the `error` field of a body, if it is an object
    pub fn from_body(body: &'a Value) -> Option<Self> {
        body.get("error").filter(|e| e.is_object()).map(|value| Self { value })
    }

    /// The raw `error` object
    pub const fn as_value(&self) -> &'a Value {
        self.value
    }

    /// Server-declared error type (`error.type`)
    pub fn error_type(&self) -> Option<&'a str> {
        self.value.get("type").and_then(Value::as_str)
    }

    /// Structured errors (`error.errors`), empty when missing or malformed
    pub fn errors(&self) -> &'a [Value] {
        self.value
            .get("errors")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Message of the first structured error
    pub fn first_message(&self) -> Option<&'a str> {
        self.errors().first()?.get("message").and_then(Value::as_str)
    }

    /// Top-level summary message (`error.message`)
    pub fn message(&self) -> Option<&'a str> {
        self.value.get("message").and_then(Value::as_str)
    }

    /// Entity context attached by the engine (`error.entity_info`)
    pub fn entity_info(&self) -> Option<&'a serde_json::Map<String, Value>> {
        self.value.get("entity_info").and_then(Value::as_object)
    }
}
