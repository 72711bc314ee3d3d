use http::StatusCode;
use serde_json::Value;

use crate::body::ErrorDetails;
use crate::context::ExceptionContext;
use crate::kind::ErrorKind;

/// A failed Papiea response, classified
///
/// Always carries the original status, reason phrase and body, whatever
/// kind it was classified as. Immutable once built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} ({}): {message}", .status.as_u16())]
pub struct PapieaException {
    kind: ErrorKind,
    message: String,
    status: StatusCode,
    reason: Option<String>,
    details: ErrorDetails,
    context: ExceptionContext,
}

impl PapieaException {
    /// Build an exception from a response's status, reason and body
    ///
    /// Entity context is lifted from `error.entity_info` when present.
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        status: StatusCode,
        reason: Option<String>,
        details: ErrorDetails,
    ) -> Self {
        let context = details
            .error()
            .and_then(|e| e.entity_info())
            .map(ExceptionContext::from_entity_info)
            .unwrap_or_default();

        Self {
            kind,
            message: message.into(),
            status,
            reason,
            details,
            context,
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Whether this exception was classified as `kind`
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// Human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Numeric HTTP status
    pub const fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Reason phrase of the response, if the transport reported one
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Body of the response, parsed or verbatim
    pub const fn details(&self) -> &ErrorDetails {
        &self.details
    }

    /// Entity context attached by the engine
    pub const fn context(&self) -> &ExceptionContext {
        &self.context
    }

    /// The body's `error` object, or the whole details when there is none
    ///
    /// This is what gets forwarded as the cause of an invocation error.
    pub fn cause(&self) -> Value {
        self.details
            .error()
            .map_or_else(|| self.details.to_value(), |e| e.as_value().clone())
    }

    /// Structured errors reported by the server (`error.errors`)
    pub fn errors(&self) -> &[Value] {
        self.details.error().map(|e| e.errors()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn not_found() -> PapieaException {
        let body = json!({
            "error": {
                "type": "entity_not_found",
                "errors": [{ "message": "no such entity" }],
                "entity_info": { "kind_name": "Location", "entity_uuid": "abc" }
            }
        });

        PapieaException::new(
            ErrorKind::EntityNotFound,
            "no such entity",
            StatusCode::NOT_FOUND,
            Some("Not Found".to_owned()),
            ErrorDetails::Json(body),
        )
    }

    #[test]
    fn display_includes_kind_status_and_message() {
        assert_eq!(not_found().to_string(), "entity_not_found (404): no such entity");
    }

    #[test]
    fn lifts_entity_context() {
        let e = not_found();
        assert_eq!(e.context().kind_name.as_deref(), Some("Location"));
        assert_eq!(e.context().additional_info.get("entity_uuid").map(String::as_str), Some("abc"));
    }

    #[test]
    fn cause_is_error_object() {
        let e = not_found();
        assert_eq!(e.cause()["type"], "entity_not_found");
        assert_eq!(e.errors().len(), 1);
    }

    #[test]
    fn cause_falls_back_to_raw_text() {
        let e = PapieaException::new(
            ErrorKind::Generic,
            "Internal Server Error",
            StatusCode::INTERNAL_SERVER_ERROR,
            None,
            ErrorDetails::Raw("<html>boom</html>".to_owned()),
        );
        assert_eq!(e.cause(), json!("<html>boom</html>"));
        assert!(e.errors().is_empty());
        assert!(e.context().is_empty());
    }
}
