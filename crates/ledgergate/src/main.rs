//! ledgergate — edge OAuth2 session gateway for a budgeting provider.
//!
//! Main entry point: parses env-backed CLI flags, initializes tracing, and
//! runs the gateway server.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ledgergate_server::{DeploymentMode, GatewayConfig, Server};

/// Edge gateway: cookie sessions and OAuth2 against the budgeting provider.
#[derive(Parser)]
#[command(name = "ledgergate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind the gateway to
    #[arg(long, env = "LEDGERGATE_BIND", default_value = "127.0.0.1:8787")]
    bind: std::net::SocketAddr,

    /// Deployment level: "local" or "hosted"
    #[arg(long, env = "LEDGERGATE_LEVEL", default_value = "local")]
    level: String,

    /// Comma-separated browser origins allowed as clients
    #[arg(long, env = "LEDGERGATE_VALID_ORIGINS", value_delimiter = ',')]
    valid_origins: Vec<String>,

    /// OAuth client id issued by the provider
    #[arg(long, env = "LEDGERGATE_CLIENT_ID")]
    client_id: String,

    /// OAuth client secret issued by the provider
    #[arg(long, env = "LEDGERGATE_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    /// Cookie Domain attribute for hosted deployments
    #[arg(long, env = "LEDGERGATE_COOKIE_DOMAIN", default_value = "localhost")]
    cookie_domain: String,

    /// Provider OAuth token endpoint override
    #[arg(long, env = "LEDGERGATE_TOKEN_URL")]
    token_url: Option<String>,

    /// Provider API base URL override
    #[arg(long, env = "LEDGERGATE_API_URL")]
    api_url: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "ledgergate=debug,ledgergate_server=debug,ledgergate_oauth=debug,\
         ledgergate_upstream=debug,tower_http=debug,info"
    } else {
        "ledgergate=info,ledgergate_server=info,ledgergate_oauth=info,warn"
    };
    tracing_subscriber::fmt()
        .with_target(true)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    let mode = match cli.level.as_str() {
        "local" => DeploymentMode::Local,
        _ => DeploymentMode::Hosted,
    };

    let mut config = GatewayConfig::new(cli.client_id, cli.client_secret)
        .with_bind_address(cli.bind)
        .with_mode(mode)
        .with_cookie_domain(cli.cookie_domain);
    if !cli.valid_origins.is_empty() {
        config = config.with_valid_origins(cli.valid_origins);
    }
    if let Some(token_url) = cli.token_url {
        config = config.with_token_url(token_url);
    }
    if let Some(api_url) = cli.api_url {
        config = config.with_api_url(api_url);
    }

    Server::new(config)?.run().await?;
    Ok(())
}
