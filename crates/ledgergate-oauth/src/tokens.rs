//! Token exchanges against the provider's OAuth2 token endpoint.
//!
//! Two exchanges exist: the authorization-code exchange that begins a session
//! and the refresh exchange that renews one. Both POST to the same endpoint
//! with credentials in the query string (the provider's accepted form) and
//! both mint the same pair of `Set-Cookie` directives on success.

use chrono::{TimeZone, Utc};
use serde::Deserialize;

use crate::cookie::{
    ACCESS_TOKEN_COOKIE, CookieAttributes, REFRESH_TOKEN_COOKIE, cookie_value, set_cookie,
};
use crate::error::{OAuthError, Result};

/// Successful token-endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub created_at: i64,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
}

/// Error body from the token endpoint. Tolerates garbage: an unreadable
/// rejection still carries the provider's status, just with a generic code.
#[derive(Debug, Deserialize)]
struct RejectionBody {
    error: String,
    error_description: String,
}

impl TokenResponse {
    /// Absolute expiry of the access token, in milliseconds since the epoch.
    pub fn expires_at_ms(&self) -> i64 {
        (self.created_at + self.expires_in) * 1000
    }

    /// Expiry formatted as an HTTP-date for the cookie `Expires` attribute.
    pub fn expires_http_date(&self) -> String {
        let expiry = Utc
            .timestamp_millis_opt(self.expires_at_ms())
            .single()
            .unwrap_or_else(Utc::now);
        expiry.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
    }
}

/// A freshly minted session: the resolved credentials plus the two
/// `Set-Cookie` directives that transport them back to the browser.
///
/// The refresh exchange may rotate the refresh credential; callers must use
/// this session's values, never the ones they started with.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Access-token cookie (with `Expires`) and refresh-token cookie
    /// (session-scoped), in that order.
    pub cookies: [String; 2],
}

/// The provider's token endpoint bound to this gateway's client pair.
#[derive(Debug, Clone)]
pub struct TokenExchanger {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    cookie_attrs: CookieAttributes,
}

impl TokenExchanger {
    /// Create an exchanger. The `reqwest::Client` is shared for connection
    /// pooling; the exchanger itself holds no per-session state.
    pub fn new(
        http: reqwest::Client,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        cookie_attrs: CookieAttributes,
    ) -> Self {
        Self {
            http,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            cookie_attrs,
        }
    }

    /// Authorization-code exchange: begins a session.
    ///
    /// `params` are the form pairs supplied by the client; `code` and
    /// `redirect_uri` are required and the error lists exactly the missing
    /// names. All client pairs are forwarded to the provider along with the
    /// grant type and client credentials.
    pub async fn exchange_code(&self, mut params: Vec<(String, String)>) -> Result<Session> {
        let missing: Vec<String> = ["code", "redirect_uri"]
            .iter()
            .filter(|field| !params.iter().any(|(key, _)| key == *field))
            .map(|field| field.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(OAuthError::MissingFields(missing));
        }

        params.push(("grant_type".to_string(), "authorization_code".to_string()));
        self.request_tokens(params).await
    }

    /// Refresh exchange: renews a session from the request's `Cookie` header.
    ///
    /// Returns the new session, or the provider's rejection with its status
    /// and envelope intact so the router can relay it.
    pub async fn refresh(&self, cookie_header: Option<&str>) -> Result<Session> {
        let refresh_token = cookie_value(REFRESH_TOKEN_COOKIE, cookie_header);
        let params = vec![
            ("grant_type".to_string(), "refresh_token".to_string()),
            (
                "refresh_token".to_string(),
                urlencoding::encode(&refresh_token).into_owned(),
            ),
        ];
        self.request_tokens(params).await
    }

    async fn request_tokens(&self, mut params: Vec<(String, String)>) -> Result<Session> {
        params.push(("client_id".to_string(), self.client_id.clone()));
        params.push(("client_secret".to_string(), self.client_secret.clone()));

        let response = self
            .http
            .post(&self.token_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| OAuthError::Network(format!("Token request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let rejection = response.json::<RejectionBody>().await.unwrap_or_else(|_| {
                RejectionBody {
                    error: "error".to_string(),
                    error_description: "Provider returned an unreadable error response"
                        .to_string(),
                }
            });
            tracing::warn!(
                status = status.as_u16(),
                error = %rejection.error,
                "Provider rejected token exchange"
            );
            return Err(OAuthError::Rejected {
                status: status.as_u16(),
                error: rejection.error,
                error_description: rejection.error_description,
            });
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .map_err(|e| OAuthError::MalformedResponse(format!("Token response: {}", e)))?;

        Ok(self.mint_session(tokens))
    }

    /// Build the session's cookie pair from a token response.
    fn mint_session(&self, tokens: TokenResponse) -> Session {
        let expires = tokens.expires_http_date();
        let access = set_cookie(
            ACCESS_TOKEN_COOKIE,
            &tokens.access_token,
            Some(&expires),
            &self.cookie_attrs,
        );
        let refresh = set_cookie(
            REFRESH_TOKEN_COOKIE,
            &tokens.refresh_token,
            None,
            &self.cookie_attrs,
        );
        Session {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            cookies: [access, refresh],
        }
    }
}
