//! File extension resolution from response metadata and the URL.

use super::path::last_path_segment;

/// Extension used when neither the content type nor the URL gives one.
pub const FALLBACK_EXTENSION: &str = ".jpg";

/// Extensions accepted from a URL suffix (lower-case, with leading dot).
pub const ALLOWED_EXTENSIONS: [&str; 8] =
    [".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp", ".tiff", ".tif"];

/// Content-type markers in match order. Matching is a case-sensitive substring test.
const CONTENT_TYPE_MARKERS: [(&str, &str); 7] = [
    ("image/jpeg", ".jpg"),
    ("image/jpg", ".jpg"),
    ("image/png", ".png"),
    ("image/gif", ".gif"),
    ("image/webp", ".webp"),
    ("image/bmp", ".bmp"),
    ("image/tiff", ".tiff"),
];

/// Maps a `Content-Type` header value to an extension.
///
/// Parameters such as `; charset=binary` are tolerated since the match is a
/// substring test. Returns `None` for anything that is not a known image type.
pub fn extension_from_content_type(content_type: &str) -> Option<&'static str> {
    CONTENT_TYPE_MARKERS
        .iter()
        .find(|(marker, _)| content_type.contains(marker))
        .map(|(_, ext)| *ext)
}

/// Extracts an allow-listed extension from the URL's last path segment.
///
/// The suffix from the final `.` is lower-cased before lookup, so `.JPG`
/// yields `.jpg`. `.jpeg` and `.tif` are returned as-is, not normalized to
/// `.jpg`/`.tiff`.
pub fn extension_from_url(url: &str) -> Option<&'static str> {
    let segment = last_path_segment(url)?;
    let dot = segment.rfind('.')?;
    let suffix = segment[dot..].to_ascii_lowercase();
    ALLOWED_EXTENSIONS
        .iter()
        .find(|ext| **ext == suffix)
        .copied()
}

/// Resolves the output extension: content type first, then URL, then [`FALLBACK_EXTENSION`].
pub fn resolve_extension(content_type: Option<&str>, url: &str) -> &'static str {
    content_type
        .and_then(extension_from_content_type)
        .or_else(|| extension_from_url(url))
        .unwrap_or(FALLBACK_EXTENSION)
}
