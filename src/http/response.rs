//! Terminal responses produced by the json combinators.
//!
//! # Responsibilities
//! - Emit the 200 JSON success response
//! - Emit 406 when the client refuses JSON
//! - Emit 415 for non-JSON request bodies and malformed payloads
//!
//! # Design Decisions
//! - Rejections are ordinary responses, never errors
//! - The 406 body is the JSON string naming the only type on offer

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::codec::ParseError;
use crate::config::UnsupportedBody;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Body sent with 406 Not Acceptable.
pub const NOT_ACCEPTABLE_BODY: &str = "\"application/json\"";

/// Body sent with 415 when `UnsupportedBody::Explain` is configured.
pub const UNSUPPORTED_EXPLANATION: &str = "expected Content-Type: application/json";

/// Builds the success response from serialized text.
pub type Responder = Arc<dyn Fn(String) -> Response + Send + Sync>;

/// 200 with `Content-Type: application/json; charset=utf-8`.
pub fn json_response(json: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
        json,
    )
        .into_response()
}

pub fn default_responder() -> Responder {
    Arc::new(json_response)
}

pub fn not_acceptable() -> Response {
    (StatusCode::NOT_ACCEPTABLE, NOT_ACCEPTABLE_BODY).into_response()
}

pub fn unsupported_media_type(body: UnsupportedBody) -> Response {
    match body {
        UnsupportedBody::Explain => {
            (StatusCode::UNSUPPORTED_MEDIA_TYPE, UNSUPPORTED_EXPLANATION).into_response()
        }
        UnsupportedBody::Empty => StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response(),
    }
}

pub fn malformed_body(err: &ParseError) -> Response {
    (StatusCode::UNSUPPORTED_MEDIA_TYPE, err.message().to_string()).into_response()
}
