//! Remove trailing whitespace from lines

use kotlinize_core::{Edit, SourceTree, Span};
use kotlinize_syntax::KotlinSource;

use super::{line_spans, overlaps_protected, past_stop, protected_spans, FormatPass};

/// Removes whitespace at the end of lines, leaving literal interiors alone
pub struct RemoveTrailingWhitespace;

impl FormatPass for RemoveTrailingWhitespace {
    fn name(&self) -> &'static str {
        "remove_trailing_whitespace"
    }

    fn description(&self) -> &'static str {
        "Remove trailing whitespace at the end of lines"
    }

    fn check(&self, unit: &KotlinSource, stop_after: Option<Span>) -> Vec<Edit> {
        let text = unit.printed();
        let protected = protected_spans(unit.tokens());
        let mut edits = Vec::new();

        for (line_num, line) in line_spans(text).iter().enumerate() {
            if past_stop(stop_after, line.start) {
                break;
            }

            let content = &text[line.start..line.end];
            let trimmed = content.trim_end();
            if trimmed.len() == content.len() {
                continue;
            }

            let span = Span::new(line.start + trimmed.len(), line.end);
            // trailing whitespace inside a raw string or comment is content
            if overlaps_protected(&protected, span) {
                continue;
            }

            edits.push(Edit::new(
                span,
                "",
                format!("Remove trailing whitespace on line {}", line_num + 1),
            ));
        }

        edits
    }
}
