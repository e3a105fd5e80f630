//! Collapse runs of blank lines to the configured maximum

use kotlinize_core::{Edit, SourceTree, Span};
use kotlinize_syntax::kotlin::TokenKind;
use kotlinize_syntax::KotlinSource;
use regex::Regex;

use super::{in_protected, past_stop, protected_spans, FormatPass};
use crate::styles::BlankLinesStyle;

/// Limits consecutive blank lines, with separate maxima for top level and
/// code blocks
pub struct BlankLines {
    style: BlankLinesStyle,
}

impl BlankLines {
    pub fn new(style: BlankLinesStyle) -> Self {
        Self { style }
    }
}

impl FormatPass for BlankLines {
    fn name(&self) -> &'static str {
        "blank_lines"
    }

    fn description(&self) -> &'static str {
        "Collapse runs of blank lines to the style's keep-maximum"
    }

    fn check(&self, unit: &KotlinSource, stop_after: Option<Span>) -> Vec<Edit> {
        let text = unit.printed();
        let protected = protected_spans(unit.tokens());
        let mut edits = Vec::new();

        // a newline followed by one or more blank lines
        let re = Regex::new(r"\n([ \t]*\n)+").unwrap();

        for m in re.find_iter(text) {
            if past_stop(stop_after, m.start()) {
                break;
            }
            if in_protected(&protected, m.start()) {
                continue;
            }

            let blank_count = m.as_str().matches('\n').count() - 1;
            let allowed = if brace_depth_at(unit, m.start()) > 0 {
                self.style.keep_maximum_in_code
            } else {
                self.style.keep_maximum_in_declarations
            };
            if blank_count <= allowed {
                continue;
            }

            edits.push(Edit::new(
                Span::new(m.start(), m.end()),
                "\n".repeat(allowed + 1),
                "Remove extra blank lines",
            ));
        }

        edits
    }
}

/// Brace depth of the code surrounding `offset`
fn brace_depth_at(unit: &KotlinSource, offset: usize) -> usize {
    let text = unit.printed();
    let mut depth: usize = 0;
    for token in unit.tokens() {
        if token.span.end > offset {
            break;
        }
        if token.kind == TokenKind::Symbol {
            match token.text(text) {
                "{" => depth += 1,
                "}" => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
    }
    depth
}
