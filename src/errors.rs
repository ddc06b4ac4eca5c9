use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Backend returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// HTTP status of a backend rejection, if this error is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            AppError::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Helper for mapping any unknown error into a precondition failure
pub fn precondition<E: ToString>(err: E) -> AppError {
    AppError::Precondition(err.to_string())
}
