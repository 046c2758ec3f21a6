//! Origin validation and CORS header derivation.

use axum::http::{HeaderMap, HeaderValue, header};

/// Validates declared origins against the configured allow-list and derives
/// the per-request CORS header set. Stateless; headers are computed fresh for
/// every request and never cached.
#[derive(Debug, Clone, Default)]
pub struct OriginGuard {
    allowed: Vec<String>,
}

impl OriginGuard {
    /// Create a guard over an allow-list. The first entry is the default
    /// CORS origin for callers with no (or an unlisted) origin.
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }

    /// True iff the request declared an allow-listed origin (exact match).
    pub fn is_valid_client(&self, origin: Option<&str>) -> bool {
        match origin {
            Some(origin) => self.allowed.iter().any(|allowed| allowed == origin),
            None => false,
        }
    }

    /// CORS headers for a response.
    ///
    /// Unlisted and absent origins fall back to the first allow-list entry:
    /// a disallowed caller still gets a response, but one the browser's
    /// same-origin check rejects client-side.
    pub fn cors_headers(&self, origin: Option<&str>) -> HeaderMap {
        let origin = match origin {
            Some(origin) if self.is_valid_client(Some(origin)) => origin,
            _ => self.allowed.first().map(String::as_str).unwrap_or(""),
        };

        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(origin) {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        );
        headers
    }
}
