//! Turning display names into filesystem-safe path segments

use crate::constants::MAX_NAME_LEN;

/// Characters replaced with `_`
const INVALID_CHARS: [char; 10] = [' ', '/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Make a folder or request name usable as a single path segment.
///
/// Trims, replaces spaces and characters most filesystems reject, and caps
/// the result at [`MAX_NAME_LEN`] characters. Whitespace uncovered by the
/// cut is trimmed too, so applying this twice changes nothing.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .trim()
        .chars()
        .map(|c| if INVALID_CHARS.contains(&c) { '_' } else { c })
        .take(MAX_NAME_LEN)
        .collect();
    replaced.trim_end().to_string()
}

/// Like [`sanitize_filename`], using `fallback` when nothing usable is left.
///
/// Names made only of dots (`.`, `..`) would point at the current or parent
/// directory, so they count as empty.
pub fn sanitize_or(name: &str, fallback: &str) -> String {
    let sanitized = sanitize_filename(name);
    if sanitized.chars().all(|c| c == '.') {
        sanitize_filename(fallback)
    } else {
        sanitized
    }
}
