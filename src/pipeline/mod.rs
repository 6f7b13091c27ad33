//! Request pipeline binding.
//!
//! # Data Flow
//! ```text
//! axum Router / tower stack
//!     → service.rs (PipeService: Request<Body> → HttpContext)
//!     → pipe.rs (Pipe::call, composed steps)
//!     → Ok(Response)   terminal response, including 406/415 rejections
//!     → Err(PipeError) unrecovered fault, handed back to the host
//! ```
//!
//! # Design Decisions
//! - Short-circuiting is a returned `Response`, never an error
//! - Faults stay typed so the host decides how to render them
//! - Every step returns a `'static` boxed future so pipes can be shared behind `Arc`

pub mod context;
pub mod error;
pub mod pipe;
pub mod service;

pub use context::HttpContext;
pub use error::{BoxError, PipeError};
pub use pipe::{pipe_fn, Pipe, PipeFn, PipeFuture, PipeResult};
pub use service::{IntoPipeService, PipeService};
