//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the json endpoints
//! - Wire up middleware (tracing, timeout, request ID)
//! - Map unrecovered pipe faults to 500
//! - Bind server to listener with graceful shutdown

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    error_handling::HandleError,
    http::StatusCode,
    routing::{get_service, post_service},
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{AppConfig, NegotiationConfig};
use crate::json::{map_json, parse_json, respond_json, send_json};
use crate::pipeline::{HttpContext, IntoPipeService, Pipe, PipeError, PipeService};

/// Body of `GET /status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub success: bool,
}

/// Body of `POST /ack`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    pub ack: bool,
}

/// HTTP server exposing the json endpoints.
pub struct JsonServer {
    router: Router,
    config: AppConfig,
}

impl JsonServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let router = Self::build_router(&config);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig) -> Router {
        let negotiation = Arc::new(config.negotiation.clone());

        Router::new()
            .route("/status", get_service(mount(send_json(Status { success: true }))))
            .route("/echo", post_service(mount(echo(Arc::clone(&negotiation)))))
            .route("/ack", post_service(mount(acknowledge(negotiation))))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// A clone of the configured router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            missing_content_type = ?self.config.negotiation.missing_content_type,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// `POST /echo`: answer with the parsed body.
fn echo(config: Arc<NegotiationConfig>) -> impl Pipe {
    parse_json(|value: serde_json::Value, ctx: HttpContext| async move {
        respond_json(&ctx, &value)
    })
    .config(config)
}

/// `POST /ack`: flip `ack` to true.
fn acknowledge(config: Arc<NegotiationConfig>) -> impl Pipe {
    map_json(|mut ack: Ack| async move {
        ack.ack = true;
        Ok::<_, Infallible>(ack)
    })
    .config(config)
}

fn mount<P: Pipe>(
    pipe: P,
) -> HandleError<PipeService<P>, fn(PipeError) -> FaultFuture, ()> {
    HandleError::new(pipe.into_service(), handle_fault as fn(PipeError) -> FaultFuture)
}

type FaultFuture = std::future::Ready<(StatusCode, &'static str)>;

/// Unrecovered faults become 500s; nothing about the fault leaks to the client.
fn handle_fault(err: PipeError) -> FaultFuture {
    tracing::error!(error = %err, "Request pipeline fault");
    std::future::ready((StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"))
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
