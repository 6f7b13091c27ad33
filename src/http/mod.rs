//! HTTP binding of the json combinators.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum Router, tracing / timeout / request-id layers)
//!     → PipeService (pipe_fn, send_json, parse_json, map_json)
//!     → response.rs (200 JSON, 406, 415)
//!     → fault handler (500) for PipeError
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use response::{json_response, Responder, JSON_CONTENT_TYPE};
pub use server::JsonServer;
