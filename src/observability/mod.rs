//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! json combinators produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (response counters by combinator and status)
//!
//! Consumers:
//!     → stdout (fmt layer, filtered by RUST_LOG or config)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows into every log line a combinator emits
//! - Metrics are cheap (atomic increments) and no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
