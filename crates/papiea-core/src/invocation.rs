//! Error envelopes returned by procedure handlers
//!
//! A handler failure, whatever its origin, is normalized into an
//! [`InvocationError`] and sent back as
//! `{ "error": { "message", "name", "status_code", "cause" } }`.
//! `errors` and `stacktrace` are appended only when set.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum::{AsRefStr, Display};

use crate::exception::PapieaException;

/// Message used when a handler failed without a more specific description
pub const PROCEDURE_HANDLER_ERROR: &str = "Procedure Handler Error";

/// Prefix marking failures of the authorization subsystem
pub const SECURITY_API_ERROR_PREFIX: &str = "Security API Error: ";

/// Tag distinguishing ordinary handler failures from authorization failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InvocationErrorKind {
    InvocationError,
    SecurityApiError,
}

/// Anything a procedure handler can fail with
#[derive(Debug)]
pub enum HandlerFailure {
    /// A classified failure of a call to Papiea
    Papiea(PapieaException),
    /// Any other error
    Other(anyhow::Error),
    /// A bare value that is not an error at all, `null` included
    Value(Value),
}

impl HandlerFailure {
    /// Wrap an arbitrary error
    pub fn other<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        anyhow::Error::new(error).into()
    }

    /// Text form of the failure
    fn describe(&self) -> String {
        match self {
            Self::Papiea(e) => e.to_string(),
            Self::Other(e) => format!("{e:#}"),
            Self::Value(Value::String(s)) => s.clone(),
            Self::Value(v) => v.to_string(),
        }
    }

    /// The failure itself, as a JSON cause
    fn into_cause(self) -> Value {
        match self {
            Self::Papiea(e) => e.cause(),
            Self::Other(e) => Value::String(format!("{e:#}")),
            Self::Value(v) => v,
        }
    }
}

impl From<PapieaException> for HandlerFailure {
    fn from(e: PapieaException) -> Self {
        Self::Papiea(e)
    }
}

impl From<anyhow::Error> for HandlerFailure {
    fn from(e: anyhow::Error) -> Self {
        match e.downcast::<PapieaException>() {
            Ok(papiea) => Self::Papiea(papiea),
            Err(other) => Self::Other(other),
        }
    }
}

impl From<Value> for HandlerFailure {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl From<String> for HandlerFailure {
    fn from(s: String) -> Self {
        Self::Other(anyhow::Error::msg(s))
    }
}

impl From<&str> for HandlerFailure {
    fn from(s: &str) -> Self {
        s.to_owned().into()
    }
}

/// Normalized procedure failure, ready to be serialized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{name} ({status_code}): {message}")]
pub struct InvocationError {
    message: String,
    name: InvocationErrorKind,
    status_code: u16,
    cause: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    errors: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stacktrace: Option<String>,
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    error: &'a InvocationError,
}

#[derive(Deserialize)]
struct Envelope {
    error: InvocationError,
}

impl InvocationError {
    pub fn new(status_code: u16, message: impl Into<String>, cause: Value) -> Self {
        Self {
            message: message.into(),
            name: InvocationErrorKind::InvocationError,
            status_code,
            cause,
            errors: Vec::new(),
            stacktrace: None,
        }
    }

    /// Normalize a handler failure
    ///
    /// A classified Papiea failure keeps its status and forwards the
    /// server's `error` object as the cause. Anything else becomes a 500;
    /// with a non-empty `fallback_message` the cause is
    /// `{ "message": <failure text> }`, otherwise the failure itself.
    pub fn from_error(caught: impl Into<HandlerFailure>, fallback_message: Option<&str>) -> Self {
        match caught.into() {
            HandlerFailure::Papiea(e) => Self::from_exception(&e, PROCEDURE_HANDLER_ERROR),
            other => match fallback_message.filter(|m| !m.is_empty()) {
                Some(message) => Self::new(500, message, json!({ "message": other.describe() })),
                None => Self::new(500, PROCEDURE_HANDLER_ERROR, other.into_cause()),
            },
        }
    }

    /// Normalize a failure raised while consulting the authorization subsystem
    ///
    /// Same rules as [`InvocationError::from_error`], but the message is
    /// `"Security API Error: " + message` and the envelope is tagged
    /// `security_api_error`.
    pub fn security_api_error(caught: impl Into<HandlerFailure>, message: &str) -> Self {
        let message = format!("{SECURITY_API_ERROR_PREFIX}{message}");

        let error = match caught.into() {
            HandlerFailure::Papiea(e) => Self::from_exception(&e, message),
            other => Self::new(500, message, other.into_cause()),
        };

        Self {
            name: InvocationErrorKind::SecurityApiError,
            ..error
        }
    }

    fn from_exception(e: &PapieaException, message: impl Into<String>) -> Self {
        Self {
            errors: e.errors().to_vec(),
            ..Self::new(e.status_code(), message, e.cause())
        }
    }

    /// Attach a stack trace to the envelope
    #[must_use]
    pub fn with_stacktrace(mut self, stacktrace: impl Into<String>) -> Self {
        self.stacktrace = Some(stacktrace.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn kind(&self) -> InvocationErrorKind {
        self.name
    }

    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// HTTP status of the envelope, 500 if the stored code is not a valid status
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub const fn cause(&self) -> &Value {
        &self.cause
    }

    pub fn errors(&self) -> &[Value] {
        &self.errors
    }

    pub fn stacktrace(&self) -> Option<&str> {
        self.stacktrace.as_deref()
    }

    /// Serialize into the wire envelope
    pub fn to_response(&self) -> Value {
        // A struct of strings, numbers and JSON values always serializes
        serde_json::to_value(EnvelopeRef { error: self }).unwrap_or(Value::Null)
    }

    /// Parse a wire envelope produced by [`InvocationError::to_response`]
    ///
    /// # Errors
    ///
    /// Returns an error if `body` is not an invocation error envelope
    pub fn from_response(body: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value::<Envelope>(body).map(|envelope| envelope.error)
    }
}

impl From<PapieaException> for InvocationError {
    fn from(e: PapieaException) -> Self {
        Self::from_error(e, None)
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for InvocationError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), axum::Json(self.to_response())).into_response()
    }
}
