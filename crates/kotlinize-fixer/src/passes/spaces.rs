//! Normalize spacing around tokens and operators

use kotlinize_core::{Edit, SourceTree, Span};
use kotlinize_syntax::kotlin::{Token, TokenKind};
use kotlinize_syntax::KotlinSource;

use super::{past_stop, FormatPass};
use crate::styles::SpacesStyle;

/// Rewrites the whitespace between adjacent tokens on one line
///
/// Only gaps with a settled answer are touched; anything ambiguous (range
/// operators, generics, unary context) keeps its spacing as written.
pub struct Spaces {
    style: SpacesStyle,
}

impl Spaces {
    pub fn new(style: SpacesStyle) -> Self {
        Self { style }
    }

    fn desired_gap(&self, text: &str, tokens: &[Token], i: usize) -> Option<&'static str> {
        let at = tokens[i].text(text);
        let bt = tokens[i + 1].text(text);

        if bt == "," {
            return Some(if self.style.before_comma { " " } else { "" });
        }
        if at == "," {
            // a comma butting against a closer is the trailing-comma
            // pass's business, not ours
            if matches!(bt, ")" | "]" | "}") {
                return None;
            }
            return Some(if self.style.after_comma { " " } else { "" });
        }

        if bt == ":" && colon_is_declaration(text, tokens, i + 1) {
            return Some(if self.style.before_colon_in_declaration {
                " "
            } else {
                ""
            });
        }
        if at == ":" && colon_is_declaration(text, tokens, i) {
            return Some(if self.style.after_colon_in_declaration {
                " "
            } else {
                ""
            });
        }

        if self.spaced_operator(text, tokens, i) || self.spaced_operator(text, tokens, i + 1) {
            return Some(" ");
        }
        None
    }

    /// Whether `tokens[idx]` is an operator this style surrounds with spaces
    fn spaced_operator(&self, text: &str, tokens: &[Token], idx: usize) -> bool {
        if tokens[idx].kind != TokenKind::Symbol {
            return false;
        }
        match tokens[idx].text(text) {
            "=" | "+=" | "-=" | "*=" | "/=" | "%=" => self.style.around_assignment,
            "==" | "!=" | "===" | "!==" => self.style.around_equality,
            "&&" | "||" => self.style.around_logical,
            "->" => self.style.around_lambda_arrow,
            "?:" => self.style.around_elvis,
            "+" | "-" | "*" | "/" | "%" => {
                self.style.around_arithmetic && is_binary_position(text, tokens, idx)
            }
            _ => false,
        }
    }
}

impl FormatPass for Spaces {
    fn name(&self) -> &'static str {
        "spaces"
    }

    fn description(&self) -> &'static str {
        "Normalize spacing around commas, colons and operators"
    }

    fn check(&self, unit: &KotlinSource, stop_after: Option<Span>) -> Vec<Edit> {
        let text = unit.printed();
        let tokens = unit.tokens();
        let mut edits = Vec::new();

        for i in 0..tokens.len().saturating_sub(1) {
            let a = &tokens[i];
            let b = &tokens[i + 1];
            if past_stop(stop_after, b.span.start) {
                break;
            }
            if a.is_comment() || b.is_comment() {
                continue;
            }

            let gap_span = Span::new(a.span.end, b.span.start);
            let gap = gap_span.slice(text);
            if gap.contains('\n') {
                continue;
            }

            if let Some(want) = self.desired_gap(text, tokens, i) {
                if gap != want {
                    edits.push(Edit::new(gap_span, want, "Normalize spacing"));
                }
            }
        }

        edits
    }
}

/// Whether `+ - * / %` at `idx` follows something an operand can end with
fn is_binary_position(text: &str, tokens: &[Token], idx: usize) -> bool {
    if idx == 0 {
        return false;
    }
    let prev = &tokens[idx - 1];
    match prev.kind {
        TokenKind::Ident
        | TokenKind::Number
        | TokenKind::Str
        | TokenKind::RawStr
        | TokenKind::CharLit => true,
        TokenKind::Keyword => matches!(prev.text(text), "this" | "true" | "false" | "null" | "super"),
        TokenKind::Symbol => matches!(prev.text(text), ")" | "]" | "!!"),
        _ => false,
    }
}

/// Whether the `:` at `idx` annotates a declaration rather than listing
/// supertypes
///
/// Walks back to the nearest declaration keyword: a `class`, `interface` or
/// `object` header owns a supertype colon, which keeps its spacing as
/// written; a lambda opening brace means a parameter declaration.
fn colon_is_declaration(text: &str, tokens: &[Token], idx: usize) -> bool {
    for j in (0..idx).rev() {
        let t = &tokens[j];
        match t.kind {
            TokenKind::Keyword => match t.text(text) {
                "class" | "interface" | "object" => return false,
                "fun" | "val" | "var" | "catch" | "for" => return true,
                _ => {}
            },
            TokenKind::Symbol => match t.text(text) {
                "{" => return true,
                "}" | ";" => return false,
                _ => {}
            },
            _ => {}
        }
    }
    true
}
