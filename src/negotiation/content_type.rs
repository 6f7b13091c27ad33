//! Request `Content-Type` check.

use crate::config::MissingContentType;
use crate::negotiation::{HeaderView, Negotiation};

/// Decide whether the declared request body type is JSON.
///
/// `Content-Type` carries a single media type; only the first entry counts.
/// A header that is present but unparseable is accepted only if it names json.
/// An absent header is settled by `missing`.
pub fn negotiate_content_type(view: &HeaderView, missing: MissingContentType) -> Negotiation {
    match (view.media_types().first(), view.raw()) {
        (Some(declared), _) => declared.is_json().into(),
        (None, Some(raw)) => raw.to_ascii_lowercase().contains("json").into(),
        (None, None) => match missing {
            MissingContentType::Accept => Negotiation::Accepted,
            MissingContentType::Reject => Negotiation::Rejected,
        },
    }
}
