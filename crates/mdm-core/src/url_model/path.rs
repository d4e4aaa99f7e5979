//! Final path segment extraction.

/// Returns the final path segment of `url`, as it appears in the URL.
///
/// Query and fragment are ignored. Returns `None` if the URL cannot be parsed,
/// has no path segments, ends in `/`, or ends in `.` / `..`.
pub fn last_path_segment(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.last()?;
    if segment.is_empty() || segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}
