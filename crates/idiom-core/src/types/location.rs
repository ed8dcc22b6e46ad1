//! Source span types for locating matches inside a snippet.
//!
//! This module provides [`SourceSpan`], the byte and line range a detection
//! rule matched.

use serde::{Deserialize, Serialize};

/// A byte and line range within a source snippet.
///
/// # Field Conventions
///
/// - Offsets are byte offsets; `end_offset` is exclusive
/// - Lines are 1-indexed; `end_line` is the line holding the last matched byte
///
/// # Examples
///
/// ```
/// use idiom_core::SourceSpan;
///
/// let source = "let a = 1;\nlet b = a ?? 2;";
/// let start = source.find("??").unwrap();
/// let span = SourceSpan::locate(source, start, start + 2);
///
/// assert_eq!(span.start_line, 2);
/// assert_eq!(span.end_line, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceSpan {
    /// Byte offset of the first matched byte.
    pub start_offset: usize,

    /// Byte offset one past the last matched byte.
    pub end_offset: usize,

    /// Line of the first matched byte (1-indexed).
    pub start_line: usize,

    /// Line of the last matched byte (1-indexed).
    pub end_line: usize,
}

impl SourceSpan {
    /// Computes the span for the byte range `start..end` of `source`.
    ///
    /// Offsets past the end of `source` are clamped. An empty range reports
    /// the same start and end line.
    #[must_use]
    pub fn locate(source: &str, start: usize, end: usize) -> Self {
        let bytes = source.as_bytes();
        let start = start.min(bytes.len());
        let end = end.clamp(start, bytes.len());

        let start_line = 1 + count_newlines(&bytes[..start]);
        let last_byte = if end > start { end - 1 } else { start };
        let end_line = start_line + count_newlines(&bytes[start..last_byte]);

        Self {
            start_offset: start,
            end_offset: end,
            start_line,
            end_line,
        }
    }

    /// Returns the number of lines the span touches.
    #[inline]
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

#[inline]
fn count_newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_first_line() {
        let span = SourceSpan::locate("abc def", 4, 7);
        assert_eq!(span.start_offset, 4);
        assert_eq!(span.end_offset, 7);
        assert_eq!(span.start_line, 1);
        assert_eq!(span.end_line, 1);
        assert_eq!(span.line_count(), 1);
    }

    #[test]
    fn test_locate_multiline_match() {
        let source = "a\ntry {\n  x();\n} catch (e) {}";
        let start = source.find("try").expect("Should contain try");
        let end = source.find("catch").expect("Should contain catch") + "catch".len();
        let span = SourceSpan::locate(source, start, end);
        assert_eq!(span.start_line, 2);
        assert_eq!(span.end_line, 4);
        assert_eq!(span.line_count(), 3);
    }

    #[test]
    fn test_locate_match_ending_on_newline_stays_on_its_line() {
        let source = "x;\ny;\n";
        let span = SourceSpan::locate(source, 0, 3);
        assert_eq!(span.start_line, 1);
        assert_eq!(span.end_line, 1);
    }

    #[test]
    fn test_locate_clamps_out_of_range() {
        let span = SourceSpan::locate("ab", 5, 10);
        assert_eq!(span.start_offset, 2);
        assert_eq!(span.end_offset, 2);
        assert_eq!(span.start_line, 1);
    }

    #[test]
    fn test_source_span_default() {
        let span = SourceSpan::default();
        assert_eq!(span.start_offset, 0);
        assert_eq!(span.start_line, 0);
    }
}
