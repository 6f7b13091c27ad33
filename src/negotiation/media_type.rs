//! Parsed views over `Accept` and `Content-Type` header values.

use std::fmt;

use axum::http::{HeaderMap, HeaderName};

/// One entry of a media-type header, e.g. `application/json; charset=utf-8; q=0.8`.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRange {
    type_: String,
    subtype: String,
    params: Vec<(String, String)>,
    quality: f32,
}

impl MediaRange {
    /// Parse a single entry. Returns `None` when there is no `type/subtype` pair.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split(';');

        let (type_, subtype) = parts.next()?.trim().split_once('/')?;
        let type_ = type_.trim().to_ascii_lowercase();
        let subtype = subtype.trim().to_ascii_lowercase();
        if type_.is_empty() || subtype.is_empty() {
            return None;
        }

        let mut params = Vec::new();
        let mut quality = 1.0;
        for param in parts {
            let Some((key, value)) = param.split_once('=') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim().trim_matches('"');
            if key == "q" {
                quality = value
                    .parse::<f32>()
                    .ok()
                    .filter(|q| q.is_finite())
                    .unwrap_or(1.0)
                    .clamp(0.0, 1.0);
            } else {
                params.push((key, value.to_string()));
            }
        }

        Some(Self {
            type_,
            subtype,
            params,
            quality,
        })
    }

    pub fn type_(&self) -> &str {
        &self.type_
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Value of a parameter other than `q`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn quality(&self) -> f32 {
        self.quality
    }

    /// `type/subtype` without parameters.
    pub fn essence(&self) -> String {
        format!("{}/{}", self.type_, self.subtype)
    }

    /// `*/*`.
    pub fn is_any(&self) -> bool {
        self.type_ == "*" && self.subtype == "*"
    }

    /// `application/json`, or any media type naming json (`application/vnd.api+json`, `text/json`).
    pub fn is_json(&self) -> bool {
        self.is("json")
    }

    /// Whether the essence mentions `kind`, ignoring case.
    pub fn is(&self, kind: &str) -> bool {
        self.essence().contains(&kind.to_ascii_lowercase())
    }

    /// Whether this range, read as an `Accept` entry, admits a JSON response.
    pub(crate) fn admits_json(&self) -> bool {
        if self.quality <= 0.0 {
            return false;
        }
        self.is_any() || (self.type_ == "application" && self.subtype == "*") || self.is_json()
    }
}

impl fmt::Display for MediaRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.type_, self.subtype)?;
        for (key, value) in &self.params {
            write!(f, "; {}={}", key, value)?;
        }
        if self.quality < 1.0 {
            write!(f, "; q={}", self.quality)?;
        }
        Ok(())
    }
}

/// Read-only view of the media types a header declares.
///
/// An empty view means the header was absent or declared nothing usable;
/// [`HeaderView::is_present`] tells the two apart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderView {
    media_types: Vec<MediaRange>,
    raw: Option<String>,
}

impl HeaderView {
    /// Parse a comma-separated header value. Unparseable entries are skipped.
    ///
    /// A blank value counts as absent.
    pub fn parse(value: &str) -> Self {
        let raw = (!value.trim().is_empty()).then(|| value.to_string());
        Self::parse_present(value, raw)
    }

    fn parse_present(value: &str, raw: Option<String>) -> Self {
        let media_types = value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .filter_map(MediaRange::parse)
            .collect();
        Self { media_types, raw }
    }

    /// Build a view from every occurrence of `name` in `headers`.
    ///
    /// Values that are not visible ASCII contribute no media types, but the
    /// header still counts as present.
    pub fn from_headers(headers: &HeaderMap, name: HeaderName) -> Self {
        if !headers.contains_key(&name) {
            return Self::default();
        }
        let joined = headers
            .get_all(&name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join(",");
        Self::parse_present(&joined, Some(joined.clone()))
    }

    /// Whether the header was sent at all, parseable or not.
    pub fn is_present(&self) -> bool {
        self.raw.is_some()
    }

    /// The header value as received, if present.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn media_types(&self) -> &[MediaRange] {
        &self.media_types
    }

    pub fn is_empty(&self) -> bool {
        self.media_types.is_empty()
    }

    /// Whether any declared media type mentions `kind`, e.g. `has_type("json")`.
    pub fn has_type(&self, kind: &str) -> bool {
        self.media_types.iter().any(|mt| mt.is(kind))
    }
}
