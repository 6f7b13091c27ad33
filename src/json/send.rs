//! Outbound JSON: `Accept` negotiation, serialization, emission.

use axum::http::header;
use futures_util::future;
use serde::Serialize;
use tracing::debug;

use crate::codec::{self, Encoder, SerdeJson};
use crate::http::response::{self, Responder};
use crate::negotiation::{negotiate_accept, HeaderView};
use crate::observability::metrics;
use crate::pipeline::{HttpContext, Pipe, PipeError, PipeFuture, PipeResult};

const COMBINATOR: &str = "send_json";

/// A pipe answering every request with `value` as JSON.
pub struct SendJson<T, E = SerdeJson> {
    value: T,
    encoder: E,
    responder: Responder,
}

/// `sendJson(value)` with the default `serde_json` encoder.
pub fn send_json<T: Serialize>(value: T) -> SendJson<T> {
    SendJson::new(value)
}

impl<T> SendJson<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            encoder: SerdeJson,
            responder: response::default_responder(),
        }
    }
}

impl<T, E> SendJson<T, E> {
    /// Swap the serializer.
    pub fn encoder<E2: Encoder<T>>(self, encoder: E2) -> SendJson<T, E2> {
        SendJson {
            value: self.value,
            encoder,
            responder: self.responder,
        }
    }

    /// Swap the success emitter.
    pub fn responder<F>(mut self, responder: F) -> Self
    where
        F: Fn(String) -> axum::response::Response + Send + Sync + 'static,
    {
        self.responder = std::sync::Arc::new(responder);
        self
    }
}

impl<T, E> Pipe for SendJson<T, E>
where
    T: Send + Sync + 'static,
    E: Encoder<T>,
{
    fn call(&self, ctx: HttpContext) -> PipeFuture {
        let result = respond_with(&ctx, &self.value, &self.encoder, &self.responder, COMBINATOR);
        Box::pin(future::ready(result))
    }
}

/// Answer `ctx` with `value` as JSON, for use inside handlers.
pub fn respond_json<T: Serialize>(ctx: &HttpContext, value: &T) -> PipeResult {
    respond_with(ctx, value, &SerdeJson, &response::default_responder(), COMBINATOR)
}

pub(crate) fn respond_with<T, E>(
    ctx: &HttpContext,
    value: &T,
    encoder: &E,
    responder: &Responder,
    combinator: &'static str,
) -> PipeResult
where
    E: Encoder<T> + ?Sized,
{
    let accept = HeaderView::from_headers(ctx.headers(), header::ACCEPT);
    if !negotiate_accept(&accept).is_accepted() {
        debug!(
            request_id = %ctx.request_id(),
            accept = ?accept.media_types().iter().map(ToString::to_string).collect::<Vec<_>>(),
            "Client does not accept JSON"
        );
        metrics::record_response(combinator, 406);
        return Ok(response::not_acceptable());
    }

    let json = codec::serialize(value, encoder).map_err(|e| {
        tracing::warn!(request_id = %ctx.request_id(), error = %e, "Serializer failed");
        metrics::record_fault(combinator);
        PipeError::Encode(e)
    })?;

    let response = responder(json);
    metrics::record_response(combinator, response.status().as_u16());
    Ok(response)
}
