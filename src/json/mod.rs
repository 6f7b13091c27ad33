//! JSON pipeline combinators.
//!
//! # Data Flow
//! ```text
//! parse_json:  Content-Type check → read body → decode → handler(value, ctx)
//! send_json:   Accept check → encode → responder (200)
//! map_json:    parse_json stages → transform(source).await → send_json stages
//! ```
//!
//! # Outcomes
//! | Condition                              | Status |
//! |----------------------------------------|--------|
//! | `Accept` refuses JSON                  | 406    |
//! | `Content-Type` missing or not JSON     | 415    |
//! | body not syntactically valid JSON      | 415    |
//! | success                                | 200    |
//!
//! Any other failure (decoder data errors, encoder errors, transform or
//! handler errors) is returned as a [`PipeError`](crate::pipeline::PipeError).

pub mod map;
pub mod parse;
pub mod send;

pub use map::{map_json, MapJson};
pub use parse::{parse_json, ParseJson};
pub use send::{respond_json, send_json, SendJson};
