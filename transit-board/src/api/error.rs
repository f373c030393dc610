//! Upstream fetch error types.

/// Broad classification of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request could not be made or completed.
    Network,
    /// The response could not be decoded.
    Decode,
    /// The requested stop, line or file doesn't exist.
    NotFound,
    /// The fetch never produced a result (e.g. its task panicked).
    Internal,
}

/// Errors that can occur when fetching data from the upstream services.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (connection error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Requested resource doesn't exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Reading local data failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The fetch task ended without producing a result
    #[error("fetch task failed: {0}")]
    TaskFailed(String),
}

impl FetchError {
    /// Build a JSON error, keeping a short excerpt of the offending body.
    pub(crate) fn json(err: serde_json::Error, body: &str) -> Self {
        FetchError::Json {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Http(e) if e.is_decode() => ErrorKind::Decode,
            FetchError::Http(_) | FetchError::Api { .. } | FetchError::Io(_) => ErrorKind::Network,
            FetchError::Json { .. } => ErrorKind::Decode,
            FetchError::NotFound(_) => ErrorKind::NotFound,
            FetchError::TaskFailed(_) => ErrorKind::Internal,
        }
    }
}
