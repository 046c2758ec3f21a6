//! Error types for the provider API client.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, UpstreamError>;

/// Errors from the budgeting provider API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Network failure before any provider response arrived.
    #[error("Network error: {0}")]
    Network(String),

    /// The provider answered with its error object. `id` is the numeric HTTP
    /// status as a string, per the provider's wire contract.
    #[error("{detail}")]
    Api {
        id: String,
        name: String,
        detail: String,
    },

    /// The provider response body did not match the expected shape.
    #[error("Malformed provider response: {0}")]
    Malformed(String),
}

impl UpstreamError {
    /// HTTP status for this failure. Provider error ids are stringly typed;
    /// anything unparsable is treated as a server error.
    pub fn status(&self) -> u16 {
        match self {
            UpstreamError::Api { id, .. } => id.parse().unwrap_or(500),
            UpstreamError::Network(_) | UpstreamError::Malformed(_) => 500,
        }
    }
}
