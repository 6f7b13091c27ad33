//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration for the bundled server.
    pub listener: ListenerConfig,

    /// Content negotiation policy shared by the json combinators.
    pub negotiation: NegotiationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// What to do with a request that declares no `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingContentType {
    /// Answer 415 without reading the body.
    #[default]
    Reject,
    /// Try to parse the body as JSON anyway.
    Accept,
}

/// Body of the 415 sent when `Content-Type` is missing or not JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedBody {
    /// `expected Content-Type: application/json`
    #[default]
    Explain,
    /// No body.
    Empty,
}

/// Content negotiation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NegotiationConfig {
    pub missing_content_type: MissingContentType,

    pub unsupported_body: UnsupportedBody,

    /// Maximum request body size read by `parse_json`.
    pub body_limit_bytes: usize,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            missing_content_type: MissingContentType::Reject,
            unsupported_body: UnsupportedBody::Explain,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
