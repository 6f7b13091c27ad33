//! JSON content negotiation for axum / tower request pipelines.
//!
//! Three composable steps:
//! - [`send_json`]: negotiate `Accept`, serialize, answer 200 or 406
//! - [`parse_json`]: negotiate `Content-Type`, deserialize, hand the value on or answer 415
//! - [`map_json`]: both, around an async transform
//!
//! Codecs are pluggable through [`codec::Decoder`] / [`codec::Encoder`];
//! the default is `serde_json`.

pub mod codec;
pub mod config;
pub mod http;
pub mod json;
pub mod negotiation;
pub mod observability;
pub mod pipeline;

pub use config::schema::AppConfig;
pub use http::JsonServer;
pub use json::{map_json, parse_json, respond_json, send_json, MapJson, ParseJson, SendJson};
pub use pipeline::{pipe_fn, HttpContext, IntoPipeService, Pipe, PipeError, PipeResult};
