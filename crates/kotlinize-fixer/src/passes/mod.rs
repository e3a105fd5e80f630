//! Formatting pass implementations
//!
//! Each pass inspects a lexed Kotlin unit and returns edits; the composite
//! formatter applies them and re-lexes before the next pass, so every pass
//! sees the previous pass's output.

mod blank_lines;
mod normalize_tabs;
mod spaces;
mod tabs_and_indents;
mod trailing_comma;
mod trailing_whitespace;
mod wrapping_and_braces;

pub use blank_lines::BlankLines;
pub use normalize_tabs::NormalizeTabsOrSpaces;
pub use spaces::Spaces;
pub use tabs_and_indents::TabsAndIndents;
pub use trailing_comma::TrailingComma;
pub use trailing_whitespace::RemoveTrailingWhitespace;
pub use wrapping_and_braces::WrappingAndBraces;

use kotlinize_core::{Edit, Span};
use kotlinize_syntax::kotlin::Token;
use kotlinize_syntax::KotlinSource;

/// One step of the formatting pipeline
pub trait FormatPass {
    /// Internal name for this pass
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Check the unit and return edits to apply
    ///
    /// Passes stop producing edits for sites that begin after
    /// `stop_after`; `None` means the whole file.
    fn check(&self, unit: &KotlinSource, stop_after: Option<Span>) -> Vec<Edit>;
}

/// A line of text: `start..end` excludes the line terminator
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line {
    pub start: usize,
    pub end: usize,
}

/// Split `text` into lines, keeping byte offsets
pub(crate) fn line_spans(text: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut start = 0;
    for (i, b) in text.bytes().enumerate() {
        if b == b'\n' {
            let mut end = i;
            if end > start && text.as_bytes()[end - 1] == b'\r' {
                end -= 1;
            }
            lines.push(Line { start, end });
            start = i + 1;
        }
    }
    if start < text.len() {
        lines.push(Line {
            start,
            end: text.len(),
        });
    }
    lines
}

/// Spans of literal and comment tokens no pass may edit inside
pub(crate) fn protected_spans(tokens: &[Token]) -> Vec<Span> {
    tokens
        .iter()
        .filter(|t| t.is_protected())
        .map(|t| t.span)
        .collect()
}

/// Whether `offset` falls inside any protected span
pub(crate) fn in_protected(spans: &[Span], offset: usize) -> bool {
    spans.iter().any(|s| s.contains(offset))
}

/// Whether `span` overlaps any protected span
pub(crate) fn overlaps_protected(spans: &[Span], span: Span) -> bool {
    spans.iter().any(|s| s.start < span.end && span.start < s.end)
}

/// Whether a site starting at `start` lies beyond the stop-after marker
pub(crate) fn past_stop(stop_after: Option<Span>, start: usize) -> bool {
    stop_after.is_some_and(|stop| start > stop.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_spans() {
        let text = "ab\ncd\n\nef";
        let lines = line_spans(text);
        assert_eq!(lines.len(), 4);
        assert_eq!(&text[lines[0].start..lines[0].end], "ab");
        assert_eq!(&text[lines[1].start..lines[1].end], "cd");
        assert_eq!(&text[lines[2].start..lines[2].end], "");
        assert_eq!(&text[lines[3].start..lines[3].end], "ef");
    }

    #[test]
    fn test_line_spans_crlf() {
        let text = "ab\r\ncd\r\n";
        let lines = line_spans(text);
        assert_eq!(lines.len(), 2);
        assert_eq!(&text[lines[0].start..lines[0].end], "ab");
        assert_eq!(&text[lines[1].start..lines[1].end], "cd");
    }

    #[test]
    fn test_past_stop() {
        assert!(!past_stop(None, 100));
        let stop = Some(Span::new(0, 10));
        assert!(!past_stop(stop, 10));
        assert!(past_stop(stop, 11));
    }

    #[test]
    fn test_overlaps_protected() {
        let spans = vec![Span::new(5, 10)];
        assert!(overlaps_protected(&spans, Span::new(8, 12)));
        assert!(overlaps_protected(&spans, Span::new(0, 6)));
        assert!(!overlaps_protected(&spans, Span::new(10, 12)));
        assert!(!overlaps_protected(&spans, Span::new(0, 5)));
    }
}
