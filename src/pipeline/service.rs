//! Tower adapter so pipes can be mounted on an axum router.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{body::Body, http::Request, response::Response};
use tower::Service;

use crate::pipeline::{HttpContext, Pipe, PipeError, PipeFuture};

/// A [`tower::Service`] driving a shared [`Pipe`].
///
/// Always ready; faults surface as the service error so the host can map
/// them (see `HandleError` in the server).
pub struct PipeService<P: ?Sized> {
    pipe: Arc<P>,
}

impl<P: Pipe> PipeService<P> {
    pub fn new(pipe: P) -> Self {
        Self {
            pipe: Arc::new(pipe),
        }
    }
}

impl<P: ?Sized> Clone for PipeService<P> {
    fn clone(&self) -> Self {
        Self {
            pipe: Arc::clone(&self.pipe),
        }
    }
}

impl<P: Pipe + ?Sized> Service<Request<Body>> for PipeService<P> {
    type Response = Response;
    type Error = PipeError;
    type Future = PipeFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        self.pipe.call(HttpContext::from_request(request))
    }
}

/// Extension for turning any pipe into a tower service.
pub trait IntoPipeService: Pipe + Sized {
    fn into_service(self) -> PipeService<Self> {
        PipeService::new(self)
    }
}

impl<P: Pipe> IntoPipeService for P {}
