//! Shared utility functions.

/// Find the largest valid UTF-8 char boundary at or before `pos`.
///
/// Polyfill for `str::floor_char_boundary` (nightly-only). Use when
/// truncating strings by byte position to avoid panicking on multi-byte
/// characters (all of the counseling content is Korean).
pub fn floor_char_boundary(s: &str, pos: usize) -> usize {
    if pos >= s.len() {
        return s.len();
    }
    let mut i = pos;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Truncate a string to at most `max` bytes on a char boundary.
pub fn truncate_lossy(s: &str, max: usize) -> &str {
    &s[..floor_char_boundary(s, max)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_respects_multibyte_boundaries() {
        let s = "위험신호";
        // Each hangul syllable is 3 bytes; 4 is mid-character.
        assert_eq!(truncate_lossy(s, 4), "위");
        assert_eq!(truncate_lossy(s, 100), s);
        assert_eq!(truncate_lossy(s, 0), "");
    }
}
