//! The composable step abstraction.

use std::future::Future;
use std::sync::Arc;

use axum::response::Response;
use futures_util::future::BoxFuture;

use crate::pipeline::{HttpContext, PipeError};

/// Outcome of a step: a terminal response or an unrecovered fault.
pub type PipeResult = Result<Response, PipeError>;

pub type PipeFuture = BoxFuture<'static, PipeResult>;

/// A unit of request handling that consumes a context and produces a response.
pub trait Pipe: Send + Sync + 'static {
    fn call(&self, ctx: HttpContext) -> PipeFuture;
}

impl<P: Pipe + ?Sized> Pipe for Arc<P> {
    fn call(&self, ctx: HttpContext) -> PipeFuture {
        (**self).call(ctx)
    }
}

impl<P: Pipe + ?Sized> Pipe for Box<P> {
    fn call(&self, ctx: HttpContext) -> PipeFuture {
        (**self).call(ctx)
    }
}

/// A [`Pipe`] built from an async closure. See [`pipe_fn`].
#[derive(Clone, Copy)]
pub struct PipeFn<F> {
    f: F,
}

/// Build a [`Pipe`] from `Fn(HttpContext) -> impl Future<Output = PipeResult>`.
pub fn pipe_fn<F, Fut>(f: F) -> PipeFn<F>
where
    F: Fn(HttpContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = PipeResult> + Send + 'static,
{
    PipeFn { f }
}

impl<F, Fut> Pipe for PipeFn<F>
where
    F: Fn(HttpContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = PipeResult> + Send + 'static,
{
    fn call(&self, ctx: HttpContext) -> PipeFuture {
        Box::pin((self.f)(ctx))
    }
}
