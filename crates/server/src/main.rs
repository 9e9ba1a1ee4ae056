//! Shophand - MCP server for the Shopify Admin API.
//!
//! Speaks newline-delimited JSON-RPC over stdio. All logging goes to
//! stderr; stdout carries only protocol messages.
//!
//! # Usage
//!
//! ```bash
//! shophand --store-domain your-store.myshopify.com --access-token shpat_...
//! ```
//!
//! Every flag falls back to its environment variable
//! (`SHOPIFY_STORE_DOMAIN`, `SHOPIFY_ACCESS_TOKEN`, `SHOPIFY_API_VERSION`,
//! `SHOPIFY_DEFAULT_LOCATION_ID`); a `.env` file is honored when present.
//! Missing credentials end the process before the server starts.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use shophand_server::config::ServerConfig;
use shophand_server::mcp::McpServer;
use shophand_server::shopify::AdminClient;
use shophand_server::tools::{ToolContext, build_registry};

#[derive(Parser)]
#[command(name = "shophand")]
#[command(author, version, about = "MCP server exposing Shopify Admin API tools")]
struct Cli {
    /// Store domain (e.g. your-store.myshopify.com)
    #[arg(long, env = "SHOPIFY_STORE_DOMAIN")]
    store_domain: Option<String>,

    /// Admin API access token
    #[arg(long, env = "SHOPIFY_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Admin API version
    #[arg(long, env = "SHOPIFY_API_VERSION")]
    api_version: Option<String>,

    /// Location used by inventory reads when the caller omits one
    #[arg(long, env = "SHOPIFY_DEFAULT_LOCATION_ID")]
    default_location: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before clap resolves env-backed flags.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = match ServerConfig::new(
        cli.store_domain,
        cli.access_token,
        cli.api_version,
        cli.default_location,
    ) {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(store = %config.store_domain, api_version = %config.api_version, "starting");

    let ctx = ToolContext {
        transport: Arc::new(AdminClient::new(&config)),
        default_location_id: config.default_location_id.clone(),
    };

    let registry = match build_registry(&ctx) {
        Ok(registry) => registry,
        Err(e) => {
            error!("failed to build tool registry: {e}");
            return ExitCode::FAILURE;
        }
    };

    let server = McpServer::new(registry);
    if let Err(e) = server.serve_stdio().await {
        error!("stdio failure: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
