//! Cookie parsing and rendering for session transport.
//!
//! The whole session lives in two cookies. Parsing is deliberately lax:
//! values are opaque tokens and are never URL-decoded. An absent header and a
//! missing cookie both read as the empty string, so callers must treat empty
//! as "absent", never as a valid empty credential.

/// Cookie name carrying the short-lived access credential.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Cookie name carrying the long-lived refresh credential.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Extract a named value from a raw `Cookie` header.
///
/// Splits on `;`, takes the first segment containing `name`, and returns the
/// text between its first and second `=`. Returns the empty string when the
/// header is absent or nothing matches.
pub fn cookie_value(name: &str, header: Option<&str>) -> String {
    let Some(header) = header else {
        return String::new();
    };
    header
        .split(';')
        .find(|segment| segment.contains(name))
        .and_then(|segment| segment.split('=').nth(1))
        .unwrap_or_default()
        .to_string()
}

/// Attributes shared by both session cookies.
#[derive(Debug, Clone)]
pub struct CookieAttributes {
    /// Value for the `Domain` attribute.
    pub domain: String,
    /// Omit `Secure` (local development over plain HTTP).
    pub insecure: bool,
}

/// Render a `Set-Cookie` directive for a session cookie.
///
/// `expires` is an absolute HTTP-date for the `Expires` attribute; `None`
/// leaves the cookie session-scoped. Both session cookies are `HttpOnly` and
/// `SameSite=Strict`, scoped to the deployment domain.
pub fn set_cookie(
    name: &str,
    value: &str,
    expires: Option<&str>,
    attrs: &CookieAttributes,
) -> String {
    let mut directive = format!("{}={};", name, value);
    if let Some(expires) = expires {
        directive.push_str(&format!(" Expires={};", expires));
    }
    if !attrs.insecure {
        directive.push_str(" Secure;");
    }
    directive.push_str(&format!(
        " HttpOnly; SameSite=Strict; Domain={}; Path=/",
        attrs.domain
    ));
    directive
}
