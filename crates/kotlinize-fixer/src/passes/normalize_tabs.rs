//! Normalize the indentation character

use kotlinize_core::{Edit, SourceTree, Span};
use kotlinize_syntax::KotlinSource;

use super::{in_protected, line_spans, past_stop, protected_spans, FormatPass};
use crate::styles::TabsAndIndentsStyle;

/// Converts leading whitespace to the configured indent character without
/// changing its visual width
pub struct NormalizeTabsOrSpaces {
    style: TabsAndIndentsStyle,
}

impl NormalizeTabsOrSpaces {
    pub fn new(style: TabsAndIndentsStyle) -> Self {
        Self { style }
    }
}

impl FormatPass for NormalizeTabsOrSpaces {
    fn name(&self) -> &'static str {
        "normalize_tabs_or_spaces"
    }

    fn description(&self) -> &'static str {
        "Convert leading whitespace to the configured indent character"
    }

    fn check(&self, unit: &KotlinSource, stop_after: Option<Span>) -> Vec<Edit> {
        let text = unit.printed();
        let protected = protected_spans(unit.tokens());
        let mut edits = Vec::new();

        for (line_num, line) in line_spans(text).iter().enumerate() {
            if past_stop(stop_after, line.start) {
                break;
            }
            // a line opening inside a raw string or comment is content
            if in_protected(&protected, line.start) {
                continue;
            }

            let content = &text[line.start..line.end];
            let leading: String = content.chars().take_while(|c| c.is_whitespace()).collect();
            if leading.is_empty() || leading.len() == content.len() {
                continue;
            }

            let normalized = normalize_indent(&leading, &self.style);
            if normalized != leading {
                edits.push(Edit::new(
                    Span::new(line.start, line.start + leading.len()),
                    normalized,
                    format!("Normalize indentation on line {}", line_num + 1),
                ));
            }
        }

        edits
    }
}

/// Rewrite an indentation string in the target character
fn normalize_indent(indent: &str, style: &TabsAndIndentsStyle) -> String {
    if style.use_tab_character {
        let columns: usize = indent
            .chars()
            .map(|c| if c == '\t' { style.tab_size } else { 1 })
            .sum();
        let mut result = "\t".repeat(columns / style.tab_size);
        result.push_str(&" ".repeat(columns % style.tab_size));
        result
    } else {
        let mut result = String::new();
        for c in indent.chars() {
            if c == '\t' {
                result.push_str(&" ".repeat(style.tab_size));
            } else {
                result.push(c);
            }
        }
        result
    }
}
