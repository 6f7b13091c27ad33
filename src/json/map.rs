//! Parse, transform asynchronously, send.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::codec::{Decoder, Encoder, SerdeJson};
use crate::config::NegotiationConfig;
use crate::http::response::{self, Responder};
use crate::json::parse::{read_json, Parsed};
use crate::json::send::respond_with;
use crate::observability::metrics;
use crate::pipeline::{BoxError, HttpContext, Pipe, PipeError, PipeFuture};

const COMBINATOR: &str = "map_json";

/// A pipe mapping a JSON request body to a JSON response through an async transform.
///
/// `Content-Type` is checked before the body is read; `Accept` is checked
/// only after the transform has produced its target. Both must pass for a 200.
/// Dropping the returned future while the transform is pending abandons it
/// without producing a response.
pub struct MapJson<S, Tg, F, D = SerdeJson, E = SerdeJson> {
    transform: Arc<F>,
    decoder: Arc<D>,
    encoder: Arc<E>,
    responder: Responder,
    config: Arc<NegotiationConfig>,
    _marker: PhantomData<fn(S) -> Tg>,
}

/// `mapJson(transform)` with the default `serde_json` codec on both sides.
pub fn map_json<S, Tg, F, Fut, Err>(transform: F) -> MapJson<S, Tg, F>
where
    F: Fn(S) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Tg, Err>> + Send + 'static,
    Err: Into<BoxError>,
{
    MapJson {
        transform: Arc::new(transform),
        decoder: Arc::new(SerdeJson),
        encoder: Arc::new(SerdeJson),
        responder: response::default_responder(),
        config: Arc::new(NegotiationConfig::default()),
        _marker: PhantomData,
    }
}

impl<S, Tg, F, D, E> MapJson<S, Tg, F, D, E> {
    /// Swap the request deserializer.
    pub fn decoder<D2: Decoder<S>>(self, decoder: D2) -> MapJson<S, Tg, F, D2, E> {
        MapJson {
            transform: self.transform,
            decoder: Arc::new(decoder),
            encoder: self.encoder,
            responder: self.responder,
            config: self.config,
            _marker: PhantomData,
        }
    }

    /// Swap the response serializer.
    pub fn encoder<E2: Encoder<Tg>>(self, encoder: E2) -> MapJson<S, Tg, F, D, E2> {
        MapJson {
            transform: self.transform,
            decoder: self.decoder,
            encoder: Arc::new(encoder),
            responder: self.responder,
            config: self.config,
            _marker: PhantomData,
        }
    }

    /// Swap the success emitter.
    pub fn responder<R>(mut self, responder: R) -> Self
    where
        R: Fn(String) -> axum::response::Response + Send + Sync + 'static,
    {
        self.responder = Arc::new(responder);
        self
    }

    pub fn config(mut self, config: Arc<NegotiationConfig>) -> Self {
        self.config = config;
        self
    }
}

impl<S, Tg, F, Fut, Err, D, E> Pipe for MapJson<S, Tg, F, D, E>
where
    S: Send + 'static,
    Tg: Send + 'static,
    F: Fn(S) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Tg, Err>> + Send + 'static,
    Err: Into<BoxError>,
    D: Decoder<S>,
    E: Encoder<Tg>,
{
    fn call(&self, mut ctx: HttpContext) -> PipeFuture {
        let transform = Arc::clone(&self.transform);
        let decoder = Arc::clone(&self.decoder);
        let encoder = Arc::clone(&self.encoder);
        let responder = Arc::clone(&self.responder);
        let config = Arc::clone(&self.config);

        Box::pin(async move {
            let source = match read_json(&mut ctx, decoder.as_ref(), &config, COMBINATOR).await? {
                Parsed::Value(source) => source,
                Parsed::Rejected(response) => return Ok(response),
            };

            let target = match transform(source).await {
                Ok(target) => target,
                Err(err) => {
                    let err: BoxError = err.into();
                    tracing::warn!(request_id = %ctx.request_id(), error = %err, "Transform failed");
                    metrics::record_fault(COMBINATOR);
                    return Err(PipeError::Transform(err));
                }
            };

            respond_with(&ctx, &target, encoder.as_ref(), &responder, COMBINATOR)
        })
    }
}
