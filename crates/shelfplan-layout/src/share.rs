//! Share links.
//!
//! A layout travels as compact JSON, percent-encoded into the `layout` query
//! parameter of the editor URL.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::document::LayoutDocument;
use crate::error::{LayoutError, Result};

/// Query parameter carrying the layout
pub const SHARE_PARAM: &str = "layout";

/// Build a share link by appending `layout=<encoded json>` to `base_url`.
pub fn share_url(base_url: &str, document: &LayoutDocument) -> Result<String> {
    let json = document.to_json()?;
    let encoded = utf8_percent_encode(&json, NON_ALPHANUMERIC);
    let separator = if base_url.contains('?') { '&' } else { '?' };
    Ok(format!("{}{}{}={}", base_url, separator, SHARE_PARAM, encoded))
}

/// Decode the layout from a share link.
///
/// Accepts a full URL or a bare query string (with or without the leading
/// `?`). Any `#fragment` is ignored. The decoded document is validated like
/// any other import.
pub fn parse_share_url(link: &str) -> Result<LayoutDocument> {
    let link = link.trim();
    let link = link.split_once('#').map_or(link, |(before, _)| before);
    let query = link.split_once('?').map_or(link, |(_, query)| query);

    let json = form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == SHARE_PARAM)
        .map(|(_, value)| value)
        .ok_or_else(|| LayoutError::Share(format!("no '{}' parameter", SHARE_PARAM)))?;
    LayoutDocument::from_json(&json)
}
