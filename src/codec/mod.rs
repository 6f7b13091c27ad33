//! Body codec: pluggable text transforms between typed values and wire text.
//!
//! # Responsibilities
//! - Turn raw request bytes into `T` through a [`Decoder`]
//! - Turn `T` into response text through an [`Encoder`]
//! - Separate malformed input from every other decoder failure
//!
//! # Design Decisions
//! - Only [`DecodeError::Malformed`] is a client error; everything else is a fault
//! - Encoders have no failure classification of their own
//! - Closures work as codecs through [`decoder_fn`] / [`encoder_fn`]

pub mod json;

use thiserror::Error;

use crate::pipeline::BoxError;

pub use json::SerdeJson;

/// The input text is not syntactically valid for the codec's format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure reported by a [`Decoder`].
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Malformed input; answered with 415.
    #[error(transparent)]
    Malformed(#[from] ParseError),

    /// Any other failure; propagated as a fault.
    #[error("{0}")]
    Other(#[source] BoxError),
}

impl DecodeError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(ParseError::new(message))
    }

    pub fn other(err: impl Into<BoxError>) -> Self {
        Self::Other(err.into())
    }
}

/// Text → value.
pub trait Decoder<T>: Send + Sync + 'static {
    fn decode(&self, text: &str) -> Result<T, DecodeError>;
}

/// Value → text.
pub trait Encoder<T>: Send + Sync + 'static {
    fn encode(&self, value: &T) -> Result<String, BoxError>;
}

/// Decode raw body bytes.
///
/// Bytes that are not UTF-8 cannot be text in any format and count as malformed.
pub fn deserialize<T, D>(raw: &[u8], decoder: &D) -> Result<T, DecodeError>
where
    D: Decoder<T> + ?Sized,
{
    let text = std::str::from_utf8(raw)
        .map_err(|e| DecodeError::malformed(format!("request body is not valid UTF-8: {}", e)))?;
    decoder.decode(text)
}

/// Encode a value into response text.
pub fn serialize<T, E>(value: &T, encoder: &E) -> Result<String, BoxError>
where
    E: Encoder<T> + ?Sized,
{
    encoder.encode(value)
}

/// A [`Decoder`] backed by a closure. See [`decoder_fn`].
#[derive(Clone, Copy)]
pub struct DecoderFn<F> {
    f: F,
}

pub fn decoder_fn<T, F>(f: F) -> DecoderFn<F>
where
    F: Fn(&str) -> Result<T, DecodeError> + Send + Sync + 'static,
{
    DecoderFn { f }
}

impl<T, F> Decoder<T> for DecoderFn<F>
where
    F: Fn(&str) -> Result<T, DecodeError> + Send + Sync + 'static,
{
    fn decode(&self, text: &str) -> Result<T, DecodeError> {
        (self.f)(text)
    }
}

/// An [`Encoder`] backed by a closure. See [`encoder_fn`].
#[derive(Clone, Copy)]
pub struct EncoderFn<F> {
    f: F,
}

pub fn encoder_fn<T, F>(f: F) -> EncoderFn<F>
where
    F: Fn(&T) -> Result<String, BoxError> + Send + Sync + 'static,
{
    EncoderFn { f }
}

impl<T, F> Encoder<T> for EncoderFn<F>
where
    F: Fn(&T) -> Result<String, BoxError> + Send + Sync + 'static,
{
    fn encode(&self, value: &T) -> Result<String, BoxError> {
        (self.f)(value)
    }
}
