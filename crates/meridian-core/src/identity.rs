//! Identity normalization for IRI-style identifiers.
//!
//! The remote store names everything by IRI. Two display forms exist and are
//! deliberately distinct:
//! - graph labels keep the local name verbatim (underscores preserved), via
//!   [`local_name`];
//! - formatted query-result literals are humanized (underscores become
//!   spaces, empty values become the `N/A` sentinel), via
//!   [`display_literal`].

/// Sentinel rendered for missing or empty values in literal display contexts.
pub const NOT_AVAILABLE: &str = "N/A";

/// Reduce an identifier to its local name.
///
/// Takes the substring after the last `#` if present, then after the last
/// `/` of what remains; a plain literal comes back unchanged.
pub fn local_name(raw: &str) -> &str {
    let after_hash = raw.rsplit('#').next().unwrap_or(raw);
    after_hash.rsplit('/').next().unwrap_or(after_hash)
}

/// Render a query-result value for human display.
///
/// IRIs (anything starting with `http://` or `https://`) are reduced to
/// their local name with underscores rendered as spaces. Anything else is a
/// literal and passes through unchanged. Empty input yields
/// [`NOT_AVAILABLE`].
pub fn display_literal(raw: &str) -> String {
    if raw.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return local_name(raw).replace('_', " ");
    }
    raw.to_string()
}
