//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → NegotiationConfig shared via Arc with every json combinator
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - The missing-Content-Type policy and the 415 body are explicit settings

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError};
pub use schema::AppConfig;
pub use schema::ListenerConfig;
pub use schema::MissingContentType;
pub use schema::NegotiationConfig;
pub use schema::ObservabilityConfig;
pub use schema::UnsupportedBody;
pub use validation::{validate_config, ValidationError};
