//! Local file naming for remote URLs.
//!
//! Images and downloaded files land in one scratch directory under the name of
//! the URL's final path segment. Two URLs sharing that segment map to the same
//! local file; no disambiguation is attempted.

mod path;
mod sanitize;

pub use path::last_path_segment;
pub use sanitize::sanitize_file_name;

use std::path::{Path, PathBuf};

/// Name used when a URL has no usable final path segment.
pub const FALLBACK_FILE_NAME: &str = "download.bin";

/// Local file name for `url`: its sanitized final path segment, or
/// [`FALLBACK_FILE_NAME`].
///
/// - `local_file_name("https://cdn.example.com/games/setup.exe")` → `"setup.exe"`
/// - `local_file_name("https://example.com/")` → `"download.bin"`
pub fn local_file_name(url: &str) -> String {
    let sanitized = last_path_segment(url)
        .map(|segment| sanitize_file_name(&segment))
        .unwrap_or_default();
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        FALLBACK_FILE_NAME.to_string()
    } else {
        sanitized
    }
}

/// Target path of `url` inside `dir`.
pub fn local_path(dir: &Path, url: &str) -> PathBuf {
    dir.join(local_file_name(url))
}
