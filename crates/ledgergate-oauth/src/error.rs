//! Error types for the token lifecycle.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, OAuthError>;

/// Errors that can occur during token exchanges.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    /// Required fields absent from an authorization-code exchange body.
    /// The message lists exactly the missing field names.
    #[error("Missing: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Network/HTTP error reaching the token endpoint.
    #[error("Network error: {0}")]
    Network(String),

    /// The provider rejected the exchange. Status and envelope fields are
    /// carried verbatim so callers can relay them without reinterpretation.
    #[error("Provider rejected token exchange ({status}): {error_description}")]
    Rejected {
        status: u16,
        error: String,
        error_description: String,
    },

    /// The provider answered 2xx with an unparseable body.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for OAuthError {
    fn from(e: reqwest::Error) -> Self {
        OAuthError::Network(e.to_string())
    }
}
