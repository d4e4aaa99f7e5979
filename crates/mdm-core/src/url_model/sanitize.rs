//! Filesystem-safe file names.

/// Longest file name most local filesystems accept, in bytes.
const NAME_MAX: usize = 255;

/// Makes a URL segment safe to use as a local file name.
///
/// Separators, NUL and control characters become `_` (runs collapse to one),
/// leading/trailing dots, spaces and underscores are trimmed, and the result
/// is cut to [`NAME_MAX`] bytes on a char boundary.
pub fn sanitize_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let unsafe_char = matches!(c, '/' | '\\' | '\0' | ':') || c.is_control();
        if unsafe_char {
            if !out.ends_with('_') {
                out.push('_');
            }
        } else {
            out.push(c);
        }
    }

    let trimmed = out.trim_matches(|c| c == ' ' || c == '.' || c == '_');
    let mut end = trimmed.len().min(NAME_MAX);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    trimmed[..end].to_string()
}
