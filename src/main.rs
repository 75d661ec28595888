//! Hadith Gateway
//!
//! A search gateway built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                 GATEWAY                       │
//!   Client Request   │  security  →  timeout  →  rate limit  →      │
//!   ─────────────────┼─ headers      guard       (per IP)           │
//!                    │       →  normalizer  →  /v1 route groups ────┼──→ search
//!                    │                             │                │    backend
//!   Client Response  │          error stage  ◀─────┘                │
//!   ◀────────────────┼──  { status, message }                       │
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! Standalone mode owns the listen socket and fails fast on escaped errors;
//! embedded mode exposes the same pipeline as a library router.

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use hadith_gateway::config::{self, DeploymentMode};
use hadith_gateway::http::GatewayServer;
use hadith_gateway::lifecycle::supervisor;
use hadith_gateway::observability::{logging, metrics};
use hadith_gateway::search::DorarClient;

/// Command-line overrides on top of the environment configuration.
#[derive(Debug, Parser)]
#[command(name = "hadith-gateway", version, about = "Hadith search gateway")]
struct Cli {
    /// Port to bind in standalone mode.
    #[arg(long)]
    port: Option<u16>,

    /// Deployment mode.
    #[arg(long, value_enum)]
    mode: Option<DeploymentMode>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let cli = Cli::parse();

    let mut config = config::load_from_env()?;
    if let Some(port) = cli.port {
        config.listener.port = port;
    }
    if let Some(mode) = cli.mode {
        config.listener.mode = mode;
    }

    tracing::info!(
        port = config.listener.port,
        mode = ?config.listener.mode,
        request_timeout_ms = config.timeouts.request_ms,
        rate_limit_window_secs = config.rate_limit.window_secs,
        rate_limit_max = config.rate_limit.max_requests,
        "configuration loaded"
    );

    if let Some(addr) = &config.observability.metrics_address {
        match addr.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(metrics_address = %addr, error = %e, "invalid metrics address"),
        }
    }

    let search = Arc::new(DorarClient::new(&config.upstream.base_url)?);

    let mode = config.listener.mode;
    let port = config.listener.port;
    let server = GatewayServer::new(config, search);

    match mode {
        DeploymentMode::Standalone => {
            let listener = TcpListener::bind(("0.0.0.0", port)).await?;
            let code = supervisor::run_standalone(server, listener).await;
            if code != 0 {
                std::process::exit(code);
            }
        }
        DeploymentMode::Embedded => {
            // The hosting platform drives the router; nothing to supervise.
            let _router = server.into_router();
            tracing::info!("embedded mode: pipeline exposed as a library router, exiting");
        }
    }

    Ok(())
}
