//! Gateway configuration.

use std::net::SocketAddr;

/// Default path prefix stripped from request paths in hosted mode.
pub const DEFAULT_PATH_PREFIX: &str = "/api/v2";

/// Default provider OAuth token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://app.ynab.com/oauth/token";

/// Default provider REST API base URL (must end with a slash for joining).
pub const DEFAULT_API_URL: &str = "https://api.ynab.com/v1/";

/// Deployment mode for the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeploymentMode {
    /// Local development: plain-HTTP cookies, raw request paths.
    #[default]
    Local,
    /// Deployed behind the routing prefix: `Secure` cookies, prefix-stripped
    /// paths.
    Hosted,
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Address to bind the server to.
    pub bind_address: SocketAddr,

    /// Deployment mode.
    pub mode: DeploymentMode,

    /// Browser origins allowed as clients; the first entry doubles as the
    /// default CORS origin for unlisted callers.
    pub valid_origins: Vec<String>,

    /// OAuth client id issued by the provider.
    pub client_id: String,

    /// OAuth client secret issued by the provider.
    pub client_secret: String,

    /// Provider OAuth token endpoint.
    pub token_url: String,

    /// Provider REST API base URL.
    pub api_url: String,

    /// `Domain` attribute for the session cookies.
    pub cookie_domain: String,

    /// Path prefix stripped before route matching in hosted mode.
    pub path_prefix: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8787".parse().unwrap(),
            mode: DeploymentMode::Local,
            valid_origins: vec!["http://localhost:3000".to_string()],
            client_id: String::new(),
            client_secret: String::new(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            cookie_domain: "localhost".to_string(),
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
        }
    }
}

impl GatewayConfig {
    /// Create a config with the provider client pair.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ..Default::default()
        }
    }

    /// Set the bind address.
    pub fn with_bind_address(mut self, addr: SocketAddr) -> Self {
        self.bind_address = addr;
        self
    }

    /// Set the deployment mode.
    pub fn with_mode(mut self, mode: DeploymentMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the origin allow-list.
    pub fn with_valid_origins(mut self, origins: Vec<String>) -> Self {
        self.valid_origins = origins;
        self
    }

    /// Set the provider token endpoint.
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Set the provider API base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the cookie `Domain` attribute.
    pub fn with_cookie_domain(mut self, domain: impl Into<String>) -> Self {
        self.cookie_domain = domain.into();
        self
    }

    /// Set the hosted-mode path prefix.
    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }
}
