//! Turning failed HTTP responses into [`PapieaException`]s

use std::future::Future;
use std::sync::Arc;

use http::StatusCode;

use crate::body::ErrorDetails;
use crate::exception::PapieaException;
use crate::kind::ErrorKind;
use crate::registry::ExceptionRegistry;

/// A received HTTP response whose body can be read once
///
/// Reading the body consumes the response, so it can neither be read twice
/// nor outlive the read. Dropping the read future drops the response too.
pub trait PapieaResponse: Sized {
    /// Transport error raised while draining the body
    type Error: std::error::Error + Send + Sync + 'static;

    fn status(&self) -> StatusCode;

    /// Reason phrase for the status, if any
    ///
    /// Transports that do not expose the phrase sent on the wire may return
    /// the canonical phrase for the status instead.
    fn reason_phrase(&self) -> Option<&str>;

    /// Read the full body as text, consuming the response
    fn into_text(self) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Why a response did not pass [`ResponseClassifier::check`]
#[derive(Debug, thiserror::Error)]
pub enum ResponseError<E> {
    /// The server reported a failure
    #[error(transparent)]
    Papiea(#[from] PapieaException),

    /// The body could not be read
    #[error("failed to read response body: {0}")]
    Body(#[source] E),
}

/// Classifies failed responses using an injected [`ExceptionRegistry`]
#[derive(Debug, Clone, Default)]
pub struct ResponseClassifier {
    registry: Arc<ExceptionRegistry>,
}

impl ResponseClassifier {
    pub fn new(registry: ExceptionRegistry) -> Self {
        Self::with_shared_registry(Arc::new(registry))
    }

    /// Use a registry shared with other classifiers
    pub const fn with_shared_registry(registry: Arc<ExceptionRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ExceptionRegistry {
        &self.registry
    }

    /// Pass successful responses through, classify everything else
    ///
    /// Responses with a status below 400 are returned untouched with their
    /// body unread. Otherwise the body is drained exactly once and turned
    /// into a [`PapieaException`].
    ///
    /// # Errors
    ///
    /// Returns [`ResponseError::Papiea`] for any status of 400 or above, and
    /// [`ResponseError::Body`] if the body could not be read
    pub async fn check<R: PapieaResponse>(&self, response: R) -> Result<R, ResponseError<R::Error>> {
        let status = response.status();
        if status.as_u16() < 400 {
            return Ok(response);
        }

        let reason = response.reason_phrase().map(str::to_owned);
        let text = response.into_text().await.map_err(ResponseError::Body)?;

        Err(self.classify(status, reason, text).into())
    }

    /// Classify an already drained failure body
    pub fn classify(&self, status: StatusCode, reason: Option<String>, text: String) -> PapieaException {
        let details = ErrorDetails::parse(text);

        if details.as_raw().is_some() {
            tracing::error!(
                status = status.as_u16(),
                reason = reason.as_deref().unwrap_or_default(),
                "got exception while making request, body is not JSON"
            );

            let message = generic_message(&details, status, reason.as_deref());
            return PapieaException::new(ErrorKind::Generic, message, status, reason, details);
        }

        if let Some((kind, message)) = self.resolve(&details) {
            tracing::info!(
                status = status.as_u16(),
                error_type = kind.as_str(),
                %message,
                "papiea request failed"
            );

            return PapieaException::new(kind, message, status, reason, details);
        }

        tracing::error!(
            status = status.as_u16(),
            reason = reason.as_deref().unwrap_or_default(),
            %details,
            "got exception while making request"
        );

        let message = generic_message(&details, status, reason.as_deref());
        PapieaException::new(ErrorKind::Generic, message, status, reason, details)
    }

    /// Registered kind and first error message, if both are present
    fn resolve(&self, details: &ErrorDetails) -> Option<(ErrorKind, String)> {
        let error = details.error()?;
        let kind = self.registry.lookup(error.error_type()?)?;
        let message = error.first_message()?;

        Some((kind, message.to_owned()))
    }
}

/// Best available message for a failure that matched no registered kind
fn generic_message(details: &ErrorDetails, status: StatusCode, reason: Option<&str>) -> String {
    let from_body = details
        .error()
        .and_then(|e| e.message().or_else(|| e.first_message()));

    from_body
        .or(reason)
        .map_or_else(|| format!("request failed with status {}", status.as_u16()), str::to_owned)
}
