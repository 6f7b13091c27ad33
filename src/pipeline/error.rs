//! Faults that escape a pipe step.

use thiserror::Error;

/// Type-erased error produced by caller-supplied code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An unrecovered failure inside a pipe step.
///
/// Negotiation failures and malformed bodies are never reported here; they
/// are answered with a terminal 406/415 response instead.
#[derive(Debug, Error)]
pub enum PipeError {
    #[error("failed to read request body: {0}")]
    Body(#[source] axum::Error),

    #[error("deserializer failed: {0}")]
    Decode(#[source] BoxError),

    #[error("serializer failed: {0}")]
    Encode(#[source] BoxError),

    #[error("transform failed: {0}")]
    Transform(#[source] BoxError),

    #[error("handler failed: {0}")]
    Handler(#[source] BoxError),
}

impl PipeError {
    pub fn decode(err: impl Into<BoxError>) -> Self {
        Self::Decode(err.into())
    }

    pub fn encode(err: impl Into<BoxError>) -> Self {
        Self::Encode(err.into())
    }

    pub fn transform(err: impl Into<BoxError>) -> Self {
        Self::Transform(err.into())
    }

    pub fn handler(err: impl Into<BoxError>) -> Self {
        Self::Handler(err.into())
    }
}
