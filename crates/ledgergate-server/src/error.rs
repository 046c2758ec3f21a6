//! Client-facing error normalization.
//!
//! Every failure path, local or upstream, ends in exactly one Error Envelope
//! and one status code. Local failures choose their status here; provider
//! rejections are relayed with their own status and envelope, never
//! reinterpreted.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ledgergate_oauth::OAuthError;
use ledgergate_upstream::UpstreamError;

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// The stable `{error, error_description}` shape returned on any failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Machine-stable code, suitable for client-side branching.
    pub error: String,
    /// Human-readable message.
    pub error_description: String,
}

/// Map a status onto its stable machine code. Statuses outside the fixed
/// enumeration get the generic code.
pub fn code_for_status(status: u16) -> &'static str {
    match status {
        400 => "invalid_request",
        401 => "unauthorized",
        404 => "not_found",
        405 => "method_not_allowed",
        429 => "too_many_requests",
        500 => "server_error",
        _ => "error",
    }
}

/// Gateway failure taxonomy.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Missing or invalid request data.
    #[error("{0}")]
    BadRequest(String),

    /// No session: the refresh cookie is absent.
    #[error("{0}")]
    Unauthorized(String),

    /// Unknown route path.
    #[error("{0}")]
    NotFound(String),

    /// Known route, wrong method.
    #[error("{0}")]
    MethodNotAllowed(String),

    /// Unexpected internal failure. Always answered with a generic 500
    /// envelope; never swallowed.
    #[error("{0}")]
    Internal(String),

    /// A local failure with a status outside the named variants (403 for a
    /// disallowed origin, for one).
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Provider failure relayed with its own status and envelope verbatim.
    #[error("{} ({})", envelope.error_description, status)]
    Upstream { status: u16, envelope: ErrorEnvelope },
}

impl GatewayError {
    /// Normalize a local failure from a message and status code, picking the
    /// matching variant.
    pub fn for_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 => GatewayError::BadRequest(message),
            401 => GatewayError::Unauthorized(message),
            404 => GatewayError::NotFound(message),
            405 => GatewayError::MethodNotAllowed(message),
            500 => GatewayError::Internal(message),
            status => GatewayError::Status { status, message },
        }
    }

    /// The HTTP status this failure answers with.
    pub fn status(&self) -> u16 {
        match self {
            GatewayError::BadRequest(_) => 400,
            GatewayError::Unauthorized(_) => 401,
            GatewayError::NotFound(_) => 404,
            GatewayError::MethodNotAllowed(_) => 405,
            GatewayError::Internal(_) => 500,
            GatewayError::Status { status, .. } => *status,
            GatewayError::Upstream { status, .. } => *status,
        }
    }
}

impl From<OAuthError> for GatewayError {
    fn from(e: OAuthError) -> Self {
        match e {
            OAuthError::MissingFields(_) => GatewayError::BadRequest(e.to_string()),
            OAuthError::Rejected {
                status,
                error,
                error_description,
            } => GatewayError::Upstream {
                status,
                envelope: ErrorEnvelope {
                    error,
                    error_description,
                },
            },
            OAuthError::Network(msg) | OAuthError::MalformedResponse(msg) => {
                GatewayError::Internal(msg)
            }
        }
    }
}

impl From<UpstreamError> for GatewayError {
    fn from(e: UpstreamError) -> Self {
        match e {
            // The provider's `id` is the numeric status as a string; the
            // normalizer coerces it and picks the stable code from it.
            UpstreamError::Api { id, detail, .. } => {
                GatewayError::for_status(id.parse().unwrap_or(500), detail)
            }
            UpstreamError::Network(msg) | UpstreamError::Malformed(msg) => {
                GatewayError::Internal(msg)
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, envelope) = match self {
            GatewayError::Upstream { status, envelope } => (status, envelope),
            other => {
                let status = other.status();
                (
                    status,
                    ErrorEnvelope {
                        error: code_for_status(status).to_string(),
                        error_description: other.to_string(),
                    },
                )
            }
        };

        if status >= 500 {
            tracing::error!(status, error = %envelope.error, message = %envelope.error_description, "Gateway error");
        } else {
            tracing::warn!(status, error = %envelope.error, message = %envelope.error_description, "Client error");
        }

        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(envelope)).into_response()
    }
}
