//! URL checks and output naming.
//!
//! Validates candidate URLs from the CSV, resolves the extension of a
//! downloaded image, and derives the `image_<row><ext>` filename.

mod extension;
mod path;
mod validate;

pub use extension::{
    extension_from_content_type, extension_from_url, resolve_extension, ALLOWED_EXTENSIONS,
    FALLBACK_EXTENSION,
};
pub use path::last_path_segment;
pub use validate::{is_valid_url, SUPPORTED_SCHEME_PREFIXES};

/// Filename for the image downloaded from data row `row_num` (1-based).
///
/// # Examples
///
/// - `output_filename(1, ".jpg")` → `"image_1.jpg"`
/// - `output_filename(12, ".webp")` → `"image_12.webp"`
pub fn output_filename(row_num: usize, extension: &str) -> String {
    format!("image_{}{}", row_num, extension)
}
