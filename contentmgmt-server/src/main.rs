//! Content management server
//!
//! Serves the content management RPC procedures over HTTP for the content
//! types listed in the configuration file, each backed by in-memory
//! storage.
//!
//! Usage:
//!   contentmgmt-server --config contentmgmt.toml --port 5601

use std::{path::PathBuf, sync::Arc};
use anyhow::{Context, Result};
use clap::Parser;
use contentmgmt_rpc::Rpc;
use contentmgmt_server::{build_router, registry_from_config, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "contentmgmt-server")]
#[command(about = "Content management RPC server")]
struct Args {
    /// HTTP port to listen on (overrides the configuration file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "contentmgmt.toml")]
    config: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let (config, source) = ServerConfig::read(&args.config);

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    info!("Content management server starting...");
    source.log();

    let registry = registry_from_config(&config).context("Failed to register content types")?;
    info!("Registered {} content type(s)", registry.len());
    let app = build_router(Arc::new(Rpc::new(registry)));

    let port = args.port.unwrap_or(config.port);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind HTTP port {}", port))?;
    info!("HTTP API listening on port {}", port);
    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}
