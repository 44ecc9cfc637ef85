//! Last path segment of a URL, used as the filename hint for extension lookup.

/// Returns the final `/`-separated segment of the URL's path.
///
/// When `url` parses, only its path is considered, so query strings and
/// fragments never leak into the segment. Unparseable input falls back to the
/// raw text. Returns `None` for an empty segment (root path or trailing `/`).
pub fn last_path_segment(url: &str) -> Option<String> {
    let segment = match url::Url::parse(url) {
        Ok(parsed) => parsed.path().rsplit('/').next().map(str::to_string),
        Err(_) => url.rsplit('/').next().map(str::to_string),
    }?;
    if segment.is_empty() {
        return None;
    }
    Some(segment)
}
