//! Default codec over `serde_json`.

use serde::{
    de::{DeserializeOwned, IgnoredAny},
    Serialize,
};
use serde_json::error::Category;

use crate::codec::{DecodeError, Decoder, Encoder, ParseError};
use crate::pipeline::BoxError;

/// Standard JSON codec.
///
/// Syntax and early-EOF errors are malformed input. Data errors (valid JSON
/// that does not fit `T`) and IO errors are reported as faults. A data error
/// can surface before a later syntax error, so the text is re-checked before
/// it counts as well-formed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJson;

impl<T: DeserializeOwned> Decoder<T> for SerdeJson {
    fn decode(&self, text: &str) -> Result<T, DecodeError> {
        serde_json::from_str(text).map_err(|err| classify(err, text))
    }
}

impl<T: Serialize> Encoder<T> for SerdeJson {
    fn encode(&self, value: &T) -> Result<String, BoxError> {
        serde_json::to_string(value).map_err(Into::into)
    }
}

fn classify(err: serde_json::Error, text: &str) -> DecodeError {
    match err.classify() {
        Category::Syntax | Category::Eof => DecodeError::Malformed(ParseError::new(err.to_string())),
        Category::Data => match serde_json::from_str::<IgnoredAny>(text) {
            Ok(_) => DecodeError::Other(err.into()),
            Err(syntax) => DecodeError::Malformed(ParseError::new(syntax.to_string())),
        },
        Category::Io => DecodeError::Other(err.into()),
    }
}
