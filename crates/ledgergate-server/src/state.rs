//! Shared application state.

use std::sync::Arc;

use url::Url;

use ledgergate_oauth::{CookieAttributes, TokenExchanger};
use ledgergate_upstream::BudgetClient;

use crate::config::{DeploymentMode, GatewayConfig};
use crate::error::{GatewayError, Result};
use crate::origin::OriginGuard;

/// Application state shared across request tasks. Cheap to clone; everything
/// mutable per request stays on the request task, so no locking is needed.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration.
    pub config: Arc<GatewayConfig>,
    /// Origin allow-list guard.
    pub guard: OriginGuard,
    /// Token-endpoint exchanger.
    pub exchanger: TokenExchanger,
    http: reqwest::Client,
    api_url: Url,
}

impl AppState {
    /// Build state from a gateway config.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let api_url = Url::parse(&config.api_url)
            .map_err(|e| GatewayError::Internal(format!("Invalid API base URL: {}", e)))?;

        let http = reqwest::Client::new();
        let exchanger = TokenExchanger::new(
            http.clone(),
            config.token_url.clone(),
            config.client_id.clone(),
            config.client_secret.clone(),
            CookieAttributes {
                domain: config.cookie_domain.clone(),
                insecure: config.mode == DeploymentMode::Local,
            },
        );
        let guard = OriginGuard::new(config.valid_origins.clone());

        Ok(Self {
            config: Arc::new(config),
            guard,
            exchanger,
            http,
            api_url,
        })
    }

    /// Provider client bound to the resolved access credential, built fresh
    /// per request so a credential never outlives the request that minted it.
    pub fn budget_client(&self, access_token: &str) -> BudgetClient {
        BudgetClient::new(self.http.clone(), self.api_url.clone(), access_token)
    }
}
