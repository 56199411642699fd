//! Parameterized HTTP router server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request      ┌──────────────────────────────────────────────────┐
//!     ────────────────────┼─▶ http::server ──▶ routing::RouterService        │
//!                         │                          │                       │
//!                         │             ┌────────────┴───────────┐           │
//!                         │             ▼                        ▼           │
//!                         │      dynamic routes            static mounts     │
//!                         │    (pattern + params)       (prefix + ServeDir)  │
//!                         │             │                        │           │
//!     Client Response     │             ▼                        ▼           │
//!     ◀───────────────────┼──────── handler ◀── Parameters   file tree       │
//!                         └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use param_router::config::{load_config, RouterConfig};
use param_router::observability::{logging, metrics};
use param_router::routing::{Parameters, Router};
use param_router::HttpServer;

#[derive(Parser)]
#[command(name = "param-router")]
#[command(about = "HTTP router with named path parameters and static mounts", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Echo the namespace and deployment captured from the path.
async fn show_deployment(params: Parameters) -> String {
    format!(
        "{}/{}",
        params.get("namespace").unwrap_or_default(),
        params.get("deployment").unwrap_or_default()
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };

    logging::init(&config.observability.log_level);

    tracing::info!("param-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        static_mounts = config.static_mounts.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let mut router = Router::new();
    router.get(
        "/namespaces/:namespace/deployments/:deployment",
        show_deployment,
    )?;
    for mount in &config.static_mounts {
        router.mount_static(&mount.prefix, &mount.directory)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let server = HttpServer::new(router, &config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
