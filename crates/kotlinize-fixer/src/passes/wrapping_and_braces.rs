//! Brace placement and keyword continuation

use kotlinize_core::{Edit, SourceTree, Span};
use kotlinize_syntax::kotlin::TokenKind;
use kotlinize_syntax::KotlinSource;
use regex::Regex;

use super::{in_protected, past_stop, protected_spans, FormatPass};
use crate::styles::WrappingAndBracesStyle;

/// Ensures a space before opening braces and keeps `else`/`catch`/`finally`
/// on the closing-brace line
pub struct WrappingAndBraces {
    style: WrappingAndBracesStyle,
}

impl WrappingAndBraces {
    pub fn new(style: WrappingAndBracesStyle) -> Self {
        Self { style }
    }

    fn joins(&self, keyword: &str) -> bool {
        match keyword {
            "else" => !self.style.else_on_new_line,
            "catch" => !self.style.catch_on_new_line,
            "finally" => !self.style.finally_on_new_line,
            _ => false,
        }
    }
}

impl FormatPass for WrappingAndBraces {
    fn name(&self) -> &'static str {
        "wrapping_and_braces"
    }

    fn description(&self) -> &'static str {
        "Normalize brace placement and continuation keywords"
    }

    fn check(&self, unit: &KotlinSource, stop_after: Option<Span>) -> Vec<Edit> {
        let text = unit.printed();
        let tokens = unit.tokens();
        let protected = protected_spans(tokens);
        let mut edits = Vec::new();

        if self.style.space_before_left_brace {
            for i in 1..tokens.len() {
                let t = &tokens[i];
                if past_stop(stop_after, t.span.start) {
                    break;
                }
                if t.kind != TokenKind::Symbol || t.text(text) != "{" {
                    continue;
                }

                let prev = &tokens[i - 1];
                let attached = match prev.kind {
                    TokenKind::Ident | TokenKind::Keyword => true,
                    TokenKind::Symbol => matches!(prev.text(text), ")" | "]" | ">"),
                    _ => false,
                };
                if !attached {
                    continue;
                }

                let gap_span = Span::new(prev.span.end, t.span.start);
                let gap = gap_span.slice(text);
                if gap.contains('\n') || gap == " " {
                    continue;
                }
                edits.push(Edit::new(gap_span, " ", "Add space before '{'"));
            }
        }

        // `} \n else` and friends become `} else`
        let re = Regex::new(r"\}[ \t]*\n[ \t\r\n]*(else|catch|finally)\b").unwrap();
        for cap in re.captures_iter(text) {
            let whole = cap.get(0).unwrap();
            let keyword = cap.get(1).unwrap();
            if past_stop(stop_after, whole.start()) {
                break;
            }
            if in_protected(&protected, whole.start()) || in_protected(&protected, keyword.start()) {
                continue;
            }
            if !self.joins(keyword.as_str()) {
                continue;
            }
            edits.push(Edit::new(
                Span::new(whole.start() + 1, keyword.start()),
                " ",
                format!("Keep '{}' on the closing-brace line", keyword.as_str()),
            ));
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
        let edits = WrappingAndBraces::new(WrappingAndBracesStyle::default()).check(&unit, None);
        apply_edits(source, &edits).unwrap()
    }

    #[test]
    fn test_correct_unchanged() {
        let source = "fun main() {\n    run { }\n}\n";
        assert_eq!(transform(source), source);
    }

    #[test]
    fn test_space_added_before_brace() {
        assert_eq!(transform("fun main(){\n}\n"), "fun main() {\n}\n");
        assert_eq!(transform("try{\n}\n"), "try {\n}\n");
        assert_eq!(transform("items.forEach{ }\n"), "items.forEach { }\n");
    }

    #[test]
    fn test_double_space_collapsed() {
        assert_eq!(transform("fun main()  {\n}\n"), "fun main() {\n}\n");
    }

    #[test]
    fn test_brace_after_paren_untouched() {
        let source = "items.map({ it })\n";
        assert_eq!(transform(source), source);
    }

    #[test]
    fn test_brace_on_own_line_untouched() {
        let source = "fun main()\n{\n}\n";
        assert_eq!(transform(source), source);
    }

    #[test]
    fn test_else_joined() {
        let source = "if (a) {\n    x()\n}\nelse {\n    y()\n}\n";
        assert_eq!(
            transform(source),
            "if (a) {\n    x()\n} else {\n    y()\n}\n"
        );
    }

    #[test]
    fn test_catch_and_finally_joined() {
        let source = "try {\n    x()\n}\ncatch (e: Exception) {\n}\nfinally {\n}\n";
        assert_eq!(
            transform(source),
            "try {\n    x()\n} catch (e: Exception) {\n} finally {\n}\n"
        );
    }

    #[test]
    fn test_comment_between_blocks_preserved() {
        let source = "if (a) {\n    x()\n}\n// fallback\nelse {\n}\n";
        assert_eq!(transform(source), source);
    }

    #[test]
    fn test_else_on_new_line_style_respected() {
        let style = WrappingAndBracesStyle {
            else_on_new_line: true,
            ..WrappingAndBracesStyle::default()
        };
        let source = "if (a) {\n    x()\n}\nelse {\n}\n";
        let unit = KotlinSource::parse(source).unwrap();
        let edits = WrappingAndBraces::new(style).check(&unit, None);
        assert!(edits.is_empty());
    }

    #[test]
    fn test_brace_in_string_untouched() {
        let source = "val s = \"if(){\"\n";
        assert_eq!(transform(source), source);
    }
}
