//! Pre-flight URL check applied before a row is fetched.

/// Scheme prefixes accepted by [`is_valid_url`]. Matching is case-sensitive.
pub const SUPPORTED_SCHEME_PREFIXES: [&str; 4] = ["http://", "https://", "ftp://", "file://"];

const FILE_PREFIX: &str = "file://";

/// Returns true if `candidate` looks like a fetchable URL.
///
/// Leading/trailing whitespace is ignored. The trimmed string must start with
/// one of [`SUPPORTED_SCHEME_PREFIXES`]. A `file://` URL needs at least one
/// character after the scheme; for the other schemes the remainder must be
/// non-empty and free of whitespace.
///
/// This is a shallow filter: no DNS lookup and no RFC 3986 parsing.
pub fn is_valid_url(candidate: &str) -> bool {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return false;
    }

    if trimmed.starts_with(FILE_PREFIX) {
        return trimmed.len() > FILE_PREFIX.len();
    }

    SUPPORTED_SCHEME_PREFIXES
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .map(|rest| !rest.is_empty() && !rest.chars().any(char::is_whitespace))
        .unwrap_or(false)
}
