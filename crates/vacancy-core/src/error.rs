use thiserror::Error;

/// Application-wide error types for the vacancy pipeline.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request URL is malformed. Caught before any network call.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Every retrieval strategy failed or returned implausible content.
    ///
    /// This is the only fetch failure surfaced to a caller; per-strategy
    /// transport errors are logged and absorbed by the fallback loop.
    #[error(
        "Unable to access the job posting. The page might be protected or require \
         authentication. Please try copying and pasting the job description manually."
    )]
    FetchExhausted,

    /// Retrieval succeeded but no extraction path produced text meeting
    /// even the relaxed last-resort length floor.
    #[error(
        "Could not find a valid job description. The page might be protected or \
         require authentication."
    )]
    NoValidDescription,

    /// HTTP request failed (bad status, unreadable body).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Missing or invalid runtime configuration.
    #[error("Config error: {0}")]
    ConfigError(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Returns true for strategy-local transport failures that the fetch
    /// fallback loop recovers from (logged, never propagated).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::HttpError(_) | AppError::NetworkError(_) | AppError::Timeout(_)
        )
    }

    /// Returns true for input errors the caller can fix.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidUrl(_) | AppError::FetchExhausted | AppError::NoValidDescription
        )
    }
}
