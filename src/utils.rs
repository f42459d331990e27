use crate::error::{Result, ScoutError};
use url::Url;

/// Returns the first `max_chars` characters of `text`, never splitting a code point
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Parse a user-supplied absolute URL
pub fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url.trim()).map_err(|source| ScoutError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}

/// Resolve a possibly-relative link against the page it was found on
pub fn resolve_url(base: &Url, link: &str) -> Result<Url> {
    base.join(link.trim()).map_err(|source| ScoutError::InvalidUrl {
        url: link.to_string(),
        source,
    })
}
