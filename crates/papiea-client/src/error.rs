use papiea_core::{HandlerFailure, PapieaException, ResponseError};

/// Client-specific result type
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors from the Papiea client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Papiea answered with a failure status
    #[error(transparent)]
    Papiea(#[from] PapieaException),

    /// Failed to parse a successful response
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// The classified failure, if Papiea answered with one
    pub const fn as_papiea(&self) -> Option<&PapieaException> {
        match self {
            Self::Papiea(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ResponseError<reqwest::Error>> for ClientError {
    fn from(e: ResponseError<reqwest::Error>) -> Self {
        match e {
            ResponseError::Papiea(e) => Self::Papiea(e),
            ResponseError::Body(e) => Self::Http(e),
        }
    }
}

impl From<ClientError> for HandlerFailure {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Papiea(e) => Self::Papiea(e),
            other => Self::other(other),
        }
    }
}
