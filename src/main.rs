//! json-negotiate demo server.
//!
//! Serves the bundled JSON endpoints:
//! - `GET /status` answers `{"success":true}`
//! - `POST /echo` answers with the posted JSON document
//! - `POST /ack` answers the posted `{"ack": ...}` with `ack` set to true

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use json_negotiate::config::resolve_config;
use json_negotiate::http::JsonServer;
use json_negotiate::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "json-negotiate")]
#[command(about = "HTTP server with JSON content negotiation", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = resolve_config(cli.config.as_deref(), cli.bind)?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!("json-negotiate v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.listener.request_timeout_secs,
        body_limit_bytes = config.negotiation.body_limit_bytes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    JsonServer::new(config).run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
