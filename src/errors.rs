//! Error types for the CareBridge copilot
//!
//! Two layers: [`ProviderError`] describes why a single text-generation tier
//! failed, [`CopilotError`] is what the copilot operations and startup code
//! return to their callers.

use thiserror::Error;

/// Failure of one text-generation provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Provider unreachable, returned a non-2xx status, or an unusable body
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    /// Provider cannot be used with the current configuration
    #[error("Provider misconfigured: {0}")]
    Misconfigured(String),

    /// Request exceeded its time budget
    #[error("Provider timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Provider accepted the request but generation failed
    #[error("Provider failure: {0}")]
    Failure(String),
}

/// Result type alias for provider calls
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Main error type for copilot operations
#[derive(Error, Debug)]
pub enum CopilotError {
    /// Request rejected before any provider was contacted
    #[error("Validation error: {0}")]
    Validation(String),

    /// Every eligible provider failed
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP client construction errors
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for copilot operations
pub type Result<T> = std::result::Result<T, CopilotError>;

impl CopilotError {
    /// True when the request itself was at fault rather than the backend
    pub fn is_client_error(&self) -> bool {
        matches!(self, CopilotError::Validation(_))
    }
}
