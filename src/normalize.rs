//! Text normalization for golden comparisons
//!
//! Captured output and expectation files are canonicalized before they are
//! compared, so that line-ending convention and trailing-whitespace noise do
//! not flip a verdict. Everything else (leading whitespace, internal blank
//! lines, non-trailing content) stays significant.

/// Canonicalize a text stream for comparison.
///
/// Splits on any of `\r\n`, `\r`, `\n` (treated as equivalent), strips
/// trailing whitespace from every line, rejoins with `\n`, then strips
/// trailing whitespace from the whole result. Pure and idempotent.
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let joined = unified
        .split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    joined.trim_end().to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idempotent() {
        let once = normalize("a \r\nb\r\n\r\n");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn line_endings_are_equivalent() {
        assert_eq!(normalize("a\r\nb\r\n"), normalize("a\nb\n"));
        assert_eq!(normalize("a\rb\r"), normalize("a\nb\n"));
        assert_eq!(normalize("a\nb"), "a\nb");
    }

    #[test]
    fn strips_exactly_trailing_whitespace() {
        assert_eq!(normalize("a \nb\n\n"), "a\nb");
    }

    #[test]
    fn preserves_leading_and_internal_whitespace() {
        assert_eq!(normalize("  indented\n\nafter blank"), "  indented\n\nafter blank");
    }

    #[test]
    fn empty_and_whitespace_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t\n"), "");
    }

    #[test]
    fn mixed_endings_in_one_blob() {
        assert_eq!(normalize("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }
}
