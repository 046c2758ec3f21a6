//! Session-authenticated HTTP gateway pipeline.
//!
//! Every inbound request flows Router → Origin Guard → session check →
//! (refresh exchange if the access cookie is absent) → operation handler,
//! with every failure normalized into the stable Error Envelope. The gateway
//! is stateless between requests: the browser's cookie jar is the only
//! session store.
//!
//! # Example
//!
//! ```ignore
//! use ledgergate_server::{GatewayConfig, Server};
//!
//! let config = GatewayConfig::new("client-id", "client-secret")
//!     .with_valid_origins(vec!["https://app.example".to_string()]);
//!
//! let server = Server::new(config)?;
//! server.run().await?;
//! ```

pub mod config;
pub mod error;
pub mod origin;
pub mod routes;
pub mod state;

pub use config::{DeploymentMode, GatewayConfig};
pub use error::{ErrorEnvelope, GatewayError, Result, code_for_status};
pub use origin::OriginGuard;
pub use state::AppState;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// The gateway HTTP server.
pub struct Server {
    state: AppState,
}

impl Server {
    /// Create a server from a gateway configuration.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        Ok(Self {
            state: AppState::new(config)?,
        })
    }

    /// Create a server from a pre-built application state.
    pub fn from_state(state: AppState) -> Self {
        Self { state }
    }

    /// Build the router. All requests funnel through the dispatch state
    /// machine; there is no axum route table to bypass it.
    pub fn router(&self) -> Router {
        Router::new()
            .fallback(routes::dispatch)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server on the configured bind address.
    pub async fn run(self) -> Result<()> {
        let addr = self.state.config.bind_address;
        let router = self.router();

        info!("Starting gateway on {}", addr);

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Internal(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| GatewayError::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }
}
