//! Per-request context handed through pipe steps.

use axum::{
    body::{Body, Bytes},
    http::{request::Parts, HeaderMap, Method, Request, Uri},
};

use crate::pipeline::PipeError;

/// A request split into its head and a body that can be consumed once.
#[derive(Debug)]
pub struct HttpContext {
    parts: Parts,
    body: Option<Body>,
}

impl HttpContext {
    /// Wrap an inbound request.
    pub fn from_request(request: Request<Body>) -> Self {
        let (parts, body) = request.into_parts();
        Self {
            parts,
            body: Some(body),
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    /// Value of the `x-request-id` header, if the host assigned one.
    pub fn request_id(&self) -> &str {
        self.parts
            .headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }

    /// Collect the raw body, reading at most `limit` bytes.
    ///
    /// The body is taken out of the context; reading it again yields empty bytes.
    pub async fn read_body(&mut self, limit: usize) -> Result<Bytes, PipeError> {
        match self.body.take() {
            Some(body) => axum::body::to_bytes(body, limit)
                .await
                .map_err(PipeError::Body),
            None => Ok(Bytes::new()),
        }
    }
}

impl From<Request<Body>> for HttpContext {
    fn from(request: Request<Body>) -> Self {
        Self::from_request(request)
    }
}
