//! Response `Accept` check.

use crate::negotiation::{HeaderView, Negotiation};

/// Decide whether the client accepts `application/json`.
///
/// No declared media types means no preference. Otherwise at least one
/// entry with a non-zero quality must be `*/*`, `application/*` or a JSON type.
pub fn negotiate_accept(view: &HeaderView) -> Negotiation {
    if view.is_empty() {
        return Negotiation::Accepted;
    }
    view.media_types().iter().any(|mt| mt.admits_json()).into()
}
