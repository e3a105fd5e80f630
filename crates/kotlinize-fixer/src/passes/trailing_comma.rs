//! Insert trailing commas in multi-line groups

use kotlinize_core::{Edit, SourceTree, Span};
use kotlinize_syntax::kotlin::{Token, TokenKind};
use kotlinize_syntax::KotlinSource;

use super::{past_stop, FormatPass};
use crate::styles::OtherStyle;

/// Adds a comma after the last element of a multi-line `(...)` or `[...]`
/// group
///
/// Control-flow headers are excluded: a trailing comma is not valid after
/// an `if`/`while`/`for`/`when`/`catch` condition. The pass only inserts;
/// an existing trailing comma is never removed.
pub struct TrailingComma {
    style: OtherStyle,
}

impl TrailingComma {
    pub fn new(style: OtherStyle) -> Self {
        Self { style }
    }
}

impl FormatPass for TrailingComma {
    fn name(&self) -> &'static str {
        "trailing_comma"
    }

    fn description(&self) -> &'static str {
        "Insert trailing commas in multi-line groups"
    }

    fn check(&self, unit: &KotlinSource, stop_after: Option<Span>) -> Vec<Edit> {
        if !self.style.use_trailing_comma {
            return Vec::new();
        }

        let text = unit.printed();
        let tokens = unit.tokens();
        let mut edits = Vec::new();
        let mut stack: Vec<usize> = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            if token.kind != TokenKind::Symbol {
                continue;
            }
            match token.text(text) {
                "(" | "[" => stack.push(i),
                ")" | "]" => {
                    let Some(open_idx) = stack.pop() else {
                        continue;
                    };
                    if past_stop(stop_after, token.span.start) {
                        continue;
                    }
                    if let Some(edit) = trailing_comma_site(text, tokens, open_idx, i) {
                        edits.push(edit);
                    }
                }
                _ => {}
            }
        }

        edits
    }
}

fn trailing_comma_site(
    text: &str,
    tokens: &[Token],
    open_idx: usize,
    close_idx: usize,
) -> Option<Edit> {
    let close = &tokens[close_idx];

    // last element token, ignoring comments between it and the closer
    let last = tokens[open_idx + 1..close_idx]
        .iter()
        .rev()
        .find(|t| !t.is_comment())?;
    if last.text(text) == "," {
        return None;
    }

    // only multi-line groups take a trailing comma
    if !text[last.span.end..close.span.start].contains('\n') {
        return None;
    }

    // condition parentheses never take one
    if tokens[open_idx].text(text) == "(" && open_idx > 0 {
        let before = &tokens[open_idx - 1];
        if before.kind == TokenKind::Keyword
            && matches!(before.text(text), "if" | "while" | "for" | "when" | "catch")
        {
            return None;
        }
    }

    Some(Edit::insert(
        last.span.end,
        ",",
        "Insert trailing comma",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kotlinize_core::apply_edits;

    fn transform(source: &str) -> String {
        let unit = KotlinSource::parse(source).unwrap();
        let edits = TrailingComma::new(OtherStyle::default()).check(&unit, None);
        apply_edits(source, &edits).unwrap()
    }

    #[test]
    fn test_multiline_call_gains_comma() {
        let source = "val xs = listOf(\n    1,\n    2\n)\n";
        assert_eq!(transform(source), "val xs = listOf(\n    1,\n    2,\n)\n");
    }

    #[test]
    fn test_existing_comma_unchanged() {
        let source = "val xs = listOf(\n    1,\n    2,\n)\n";
        assert_eq!(transform(source), source);
    }

    #[test]
    fn test_single_line_unchanged() {
        let source = "val xs = listOf(1, 2)\n";
        assert_eq!(transform(source), source);
    }

    #[test]
    fn test_empty_group_unchanged() {
        let source = "val xs = listOf(\n)\n";
        assert_eq!(transform(source), source);
    }

    #[test]
    fn test_parameter_list_gains_comma() {
        let source = "fun f(\n    a: Int,\n    b: Int\n) = a + b\n";
        assert_eq!(transform(source), "fun f(\n    a: Int,\n    b: Int,\n) = a + b\n");
    }

    #[test]
    fn test_index_brackets_gain_comma() {
        let source = "val v = m[\n    key\n]\n";
        assert_eq!(transform(source), "val v = m[\n    key,\n]\n");
    }

    #[test]
    fn test_condition_parens_excluded() {
        let source = "if (\n    ready\n) {\n    go()\n}\n";
        assert_eq!(transform(source), source);

        let loop_source = "while (\n    busy()\n) {\n}\n";
        assert_eq!(transform(loop_source), loop_source);
    }

    #[test]
    fn test_nested_groups_each_get_one() {
        let source = "val x = f(\n    g(\n        1\n    )\n)\n";
        assert_eq!(
            transform(source),
            "val x = f(\n    g(\n        1,\n    ),\n)\n"
        );
    }

    #[test]
    fn test_comment_before_closer_skipped_over() {
        let source = "val xs = listOf(\n    1\n    // last\n)\n";
        assert_eq!(transform(source), "val xs = listOf(\n    1,\n    // last\n)\n");
    }

    #[test]
    fn test_disabled_style_is_noop() {
        let style = OtherStyle {
            use_trailing_comma: false,
        };
        let source = "val xs = listOf(\n    1,\n    2\n)\n";
        let unit = KotlinSource::parse(source).unwrap();
        assert!(TrailingComma::new(style).check(&unit, None).is_empty());
    }

    #[test]
    fn test_stop_after_limits_edits() {
        let source = "val a = f(\n    1\n)\nval b = g(\n    2\n)\n";
        let unit = KotlinSource::parse(source).unwrap();
        // marker covers the first group only
        let stop = Some(Span::new(0, 18));
        let edits = TrailingComma::new(OtherStyle::default()).check(&unit, stop);
        assert_eq!(edits.len(), 1);
    }
}
