//! Media-type negotiation.
//!
//! # Responsibilities
//! - Parse `Accept` / `Content-Type` into a queryable [`HeaderView`]
//! - Decide whether a request body may be read as JSON
//! - Decide whether the client accepts a JSON response
//!
//! # Design Decisions
//! - Decisions are plain values; the caller turns `Rejected` into 406/415
//! - Matching is case-insensitive and tolerant of `+json` suffix types
//! - An absent `Accept` header accepts everything

pub mod accept;
pub mod content_type;
pub mod media_type;

pub use accept::negotiate_accept;
pub use content_type::negotiate_content_type;
pub use media_type::{HeaderView, MediaRange};

/// Outcome of a negotiation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Negotiation {
    Accepted,
    Rejected,
}

impl Negotiation {
    pub fn is_accepted(self) -> bool {
        matches!(self, Negotiation::Accepted)
    }
}

impl From<bool> for Negotiation {
    fn from(accepted: bool) -> Self {
        if accepted {
            Negotiation::Accepted
        } else {
            Negotiation::Rejected
        }
    }
}
