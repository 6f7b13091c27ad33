//! Inbound JSON: `Content-Type` negotiation, body read, deserialization.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use axum::{http::header, response::Response};
use tracing::debug;

use crate::codec::{self, DecodeError, Decoder, SerdeJson};
use crate::config::NegotiationConfig;
use crate::http::response;
use crate::negotiation::{negotiate_content_type, HeaderView};
use crate::observability::metrics;
use crate::pipeline::{HttpContext, Pipe, PipeError, PipeFuture, PipeResult};

const COMBINATOR: &str = "parse_json";

/// Result of the inbound stages: a value to hand on, or a terminal response.
pub(crate) enum Parsed<T> {
    Value(T),
    Rejected(Response),
}

/// A pipe that decodes the request body and hands it to `handler`.
///
/// The handler receives the decoded value together with the request context
/// and returns the response unchanged to the caller.
pub struct ParseJson<T, H, D = SerdeJson> {
    handler: Arc<H>,
    decoder: Arc<D>,
    config: Arc<NegotiationConfig>,
    _marker: PhantomData<fn() -> T>,
}

/// `parseJson(handler)` with the default `serde_json` decoder.
pub fn parse_json<T, H, Fut>(handler: H) -> ParseJson<T, H>
where
    H: Fn(T, HttpContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = PipeResult> + Send + 'static,
{
    ParseJson {
        handler: Arc::new(handler),
        decoder: Arc::new(SerdeJson),
        config: Arc::new(NegotiationConfig::default()),
        _marker: PhantomData,
    }
}

impl<T, H, D> ParseJson<T, H, D> {
    /// Swap the deserializer.
    pub fn decoder<D2: Decoder<T>>(self, decoder: D2) -> ParseJson<T, H, D2> {
        ParseJson {
            handler: self.handler,
            decoder: Arc::new(decoder),
            config: self.config,
            _marker: PhantomData,
        }
    }

    pub fn config(mut self, config: Arc<NegotiationConfig>) -> Self {
        self.config = config;
        self
    }
}

impl<T, H, Fut, D> Pipe for ParseJson<T, H, D>
where
    T: Send + 'static,
    H: Fn(T, HttpContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = PipeResult> + Send + 'static,
    D: Decoder<T>,
{
    fn call(&self, mut ctx: HttpContext) -> PipeFuture {
        let handler = Arc::clone(&self.handler);
        let decoder = Arc::clone(&self.decoder);
        let config = Arc::clone(&self.config);

        Box::pin(async move {
            match read_json(&mut ctx, decoder.as_ref(), &config, COMBINATOR).await? {
                Parsed::Value(value) => handler(value, ctx).await,
                Parsed::Rejected(response) => Ok(response),
            }
        })
    }
}

/// Negotiate the request `Content-Type`, then read and decode the body.
pub(crate) async fn read_json<T, D>(
    ctx: &mut HttpContext,
    decoder: &D,
    config: &NegotiationConfig,
    combinator: &'static str,
) -> Result<Parsed<T>, PipeError>
where
    D: Decoder<T> + ?Sized,
{
    let content_type = HeaderView::from_headers(ctx.headers(), header::CONTENT_TYPE);
    if !negotiate_content_type(&content_type, config.missing_content_type).is_accepted() {
        debug!(
            request_id = %ctx.request_id(),
            content_type = ?content_type.media_types().first().map(ToString::to_string),
            "Request body is not declared as JSON"
        );
        metrics::record_response(combinator, 415);
        return Ok(Parsed::Rejected(response::unsupported_media_type(
            config.unsupported_body,
        )));
    }

    let body = ctx.read_body(config.body_limit_bytes).await.map_err(|e| {
        tracing::warn!(request_id = %ctx.request_id(), error = %e, "Failed to read request body");
        metrics::record_fault(combinator);
        e
    })?;

    match codec::deserialize(&body, decoder) {
        Ok(value) => Ok(Parsed::Value(value)),
        Err(DecodeError::Malformed(err)) => {
            debug!(request_id = %ctx.request_id(), error = %err, "Malformed JSON body");
            metrics::record_response(combinator, 415);
            Ok(Parsed::Rejected(response::malformed_body(&err)))
        }
        Err(DecodeError::Other(err)) => {
            tracing::warn!(request_id = %ctx.request_id(), error = %err, "Deserializer failed");
            metrics::record_fault(combinator);
            Err(PipeError::Decode(err))
        }
    }
}
