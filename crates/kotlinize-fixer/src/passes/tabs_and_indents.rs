//! Rewrite indentation depth from delimiter structure

use kotlinize_core::{Edit, SourceTree, Span};
use kotlinize_syntax::kotlin::TokenKind;
use kotlinize_syntax::KotlinSource;

use super::{in_protected, line_spans, past_stop, protected_spans, FormatPass};
use crate::styles::TabsAndIndentsStyle;

/// Re-indents every line from brace and bracket depth
///
/// A line is indented one `indent_size` per enclosing brace plus one per
/// unclosed `(`/`[` group, and a `continuation_indent` when it wraps an
/// expression (it begins with an operator or a call chain, or the previous
/// line ends mid-expression). Lines opening inside raw strings or comments
/// keep their whitespace.
pub struct TabsAndIndents {
    style: TabsAndIndentsStyle,
}

impl TabsAndIndents {
    pub fn new(style: TabsAndIndentsStyle) -> Self {
        Self { style }
    }

    fn render(&self, columns: usize) -> String {
        if self.style.use_tab_character {
            let mut indent = "\t".repeat(columns / self.style.tab_size);
            indent.push_str(&" ".repeat(columns % self.style.tab_size));
            indent
        } else {
            " ".repeat(columns)
        }
    }
}

/// Operators that mark a line as an expression continuation
const CONTINUATION_STARTERS: &[&str] = &[
    ".", "?.", "?:", "&&", "||", "+", "-", "*", "/", "%", "==", "!=",
];

/// Line-final tokens after which the next line continues the expression
const CONTINUATION_ENDERS: &[&str] = &["=", "+", "-", "*", "/", "%", "&&", "||", "?:"];

impl FormatPass for TabsAndIndents {
    fn name(&self) -> &'static str {
        "tabs_and_indents"
    }

    fn description(&self) -> &'static str {
        "Rewrite indentation depth from delimiter structure"
    }

    fn check(&self, unit: &KotlinSource, stop_after: Option<Span>) -> Vec<Edit> {
        let text = unit.printed();
        let tokens = unit.tokens();
        let protected = protected_spans(tokens);
        let lines = line_spans(text);
        let mut edits = Vec::new();

        let mut token_idx = 0;
        let mut brace_depth: usize = 0;
        let mut group_depth: usize = 0;
        let mut prev_ends_mid_expression = false;

        for (line_no, line) in lines.iter().enumerate() {
            let boundary = lines
                .get(line_no + 1)
                .map(|next| next.start)
                .unwrap_or(text.len());

            let first_idx = token_idx;
            while token_idx < tokens.len() && tokens[token_idx].span.start < boundary {
                token_idx += 1;
            }
            let line_tokens = &tokens[first_idx..token_idx];
            if line_tokens.is_empty() {
                continue;
            }

            let first = &line_tokens[0];
            let reindent = !past_stop(stop_after, line.start) && !in_protected(&protected, line.start);

            if reindent {
                let first_text = first.text(text);
                let mut depth = brace_depth;
                let mut groups = group_depth;
                let closer = matches!(first_text, "}" | ")" | "]");
                match first_text {
                    "}" => depth = depth.saturating_sub(1),
                    ")" | "]" => groups = groups.saturating_sub(1),
                    _ => {}
                }

                let continues = !closer
                    && (prev_ends_mid_expression
                        || (first.kind == TokenKind::Symbol
                            && CONTINUATION_STARTERS.contains(&first_text)));

                let columns = depth * self.style.indent_size
                    + groups * self.style.indent_size
                    + if continues {
                        self.style.continuation_indent
                    } else {
                        0
                    };

                let leading_span = Span::new(line.start, first.span.start);
                let rendered = self.render(columns);
                if leading_span.slice(text) != rendered {
                    edits.push(Edit::new(
                        leading_span,
                        rendered,
                        format!("Adjust indentation on line {}", line_no + 1),
                    ));
                }
            }

            for token in line_tokens {
                if token.kind == TokenKind::Symbol {
                    match token.text(text) {
                        "{" => brace_depth += 1,
                        "}" => brace_depth = brace_depth.saturating_sub(1),
                        "(" | "[" => group_depth += 1,
                        ")" | "]" => group_depth = group_depth.saturating_sub(1),
                        _ => {}
                    }
                }
            }

            if let Some(last) = line_tokens.iter().rev().find(|t| !t.is_comment()) {
                prev_ends_mid_expression = last.kind == TokenKind::Symbol
                    && CONTINUATION_ENDERS.contains(&last.text(text));
            }
        }

        edits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kotlinize_core::apply_edits;

    fn transform(source: &str) -> String {
        let unit = KotlinSource::parse(source).unwrap();
        let edits = TabsAndIndents::new(TabsAndIndentsStyle::default()).check(&unit, None);
        apply_edits(source, &edits).unwrap()
    }

    #[test]
    fn test_well_indented_unchanged() {
        let source = "fun main() {\n    val a = 1\n    if (a > 0) {\n        println(a)\n    }\n}\n";
        assert_eq!(transform(source), source);
    }

    #[test]
    fn test_flat_code_indented() {
        let source = "fun main() {\nval a = 1\nprintln(a)\n}\n";
        assert_eq!(
            transform(source),
            "fun main() {\n    val a = 1\n    println(a)\n}\n"
        );
    }

    #[test]
    fn test_over_indented_flattened() {
        let source = "fun main() {\n            val a = 1\n}\n";
        assert_eq!(transform(source), "fun main() {\n    val a = 1\n}\n");
    }

    #[test]
    fn test_wrapped_arguments() {
        let source = "fun main() {\n    val xs = listOf(\n    1,\n    2,\n    )\n}\n";
        assert_eq!(
            transform(source),
            "fun main() {\n    val xs = listOf(\n        1,\n        2,\n    )\n}\n"
        );
    }

    #[test]
    fn test_nested_groups_compound() {
        let source = "val x = f(\ng(\n1,\n),\n)\n";
        assert_eq!(transform(source), "val x = f(\n    g(\n        1,\n    ),\n)\n");
    }

    #[test]
    fn test_expression_continuation() {
        let source = "fun f() =\nlistOf(1)\n";
        assert_eq!(transform(source), "fun f() =\n        listOf(1)\n");
    }

    #[test]
    fn test_chain_continuation() {
        let source = "fun f() {\n    val y = listOf(1)\n    .map { it }\n}\n";
        assert_eq!(
            transform(source),
            "fun f() {\n    val y = listOf(1)\n            .map { it }\n}\n"
        );
    }

    #[test]
    fn test_class_header_then_body() {
        let source = "class Foo(\nval a: Int,\n) : Base() {\nfun f() = a\n}\n";
        assert_eq!(
            transform(source),
            "class Foo(\n    val a: Int,\n) : Base() {\n    fun f() = a\n}\n"
        );
    }

    #[test]
    fn test_raw_string_interior_untouched() {
        let source = "fun f() {\n    val s = \"\"\"\n  keep me\n\"\"\"\n}\n";
        assert_eq!(transform(source), source);
    }

    #[test]
    fn test_tab_rendering() {
        let style = TabsAndIndentsStyle {
            use_tab_character: true,
            ..TabsAndIndentsStyle::default()
        };
        let source = "fun main() {\nval a = 1\n}\n";
        let unit = KotlinSource::parse(source).unwrap();
        let edits = TabsAndIndents::new(style).check(&unit, None);
        assert_eq!(
            apply_edits(source, &edits).unwrap(),
            "fun main() {\n\tval a = 1\n}\n"
        );
    }

    #[test]
    fn test_stop_after_leaves_rest_alone() {
        let source = "fun a() {\nx()\n}\nfun b() {\ny()\n}\n";
        let unit = KotlinSource::parse(source).unwrap();
        // marker covers only fun a
        let stop = Some(Span::new(0, 12));
        let edits = TabsAndIndents::new(TabsAndIndentsStyle::default()).check(&unit, stop);
        let out = apply_edits(source, &edits).unwrap();
        assert_eq!(out, "fun a() {\n    x()\n}\nfun b() {\ny()\n}\n");
    }
}
