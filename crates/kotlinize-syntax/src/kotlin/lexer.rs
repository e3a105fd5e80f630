//! Kotlin lexer - tokenizes source into spanned tokens
//!
//! Formatting only needs token boundaries and coarse classes, not a full
//! grammar: the passes ask "what separates these two tokens" and "is this
//! offset inside a literal". The lexer is tolerant enough to also handle
//! Groovy build scripts (single-quoted strings of any length).

use kotlinize_core::Span;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexError {
    #[error("unterminated string literal at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error("unterminated raw string literal at offset {offset}")]
    UnterminatedRawString { offset: usize },

    #[error("unterminated character literal at offset {offset}")]
    UnterminatedCharacter { offset: usize },

    #[error("unterminated block comment at offset {offset}")]
    UnterminatedComment { offset: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Keyword,
    Number,
    /// An escaped string, `${}` templates included in the span
    Str,
    /// A triple-quoted raw string
    RawStr,
    CharLit,
    LineComment,
    BlockComment,
    /// Any operator or punctuation; compare via `Token::text`
    Symbol,
}

#[derive(Debug, Clone, Copy)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span.slice(source)
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Literal and comment tokens whose interior no pass may edit
    pub fn is_protected(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Str
                | TokenKind::RawStr
                | TokenKind::CharLit
                | TokenKind::LineComment
                | TokenKind::BlockComment
        )
    }
}

/// Kotlin hard keywords plus the soft keywords the passes care about
const KEYWORDS: &[&str] = &[
    "as", "break", "catch", "class", "companion", "const", "continue", "do", "else", "enum",
    "false", "finally", "for", "fun", "if", "import", "in", "interface", "internal", "is", "null",
    "object", "override", "package", "private", "protected", "public", "return", "super", "this",
    "throw", "true", "try", "typealias", "val", "var", "when", "while",
];

/// Multi-character operators, longest first so prefixes never win
const SYMBOLS: &[&str] = &[
    "===", "!==", "?.", "?:", "::", "->", "==", "!=", "<=", ">=", "&&", "||", "+=", "-=", "*=",
    "/=", "%=", "!!", "..",
];

/// Tokenize `source`, skipping whitespace
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer {
        source,
        input: source.as_bytes(),
        position: 0,
    }
    .run()
}

struct Lexer<'a> {
    source: &'a str,
    input: &'a [u8],
    position: usize,
}

impl<'a> Lexer<'a> {
    fn run(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.input.get(self.position + ahead).copied()
    }

    fn rest(&self) -> &'a str {
        &self.source[self.position..]
    }

    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.position += 1;
            } else {
                break;
            }
        }

        let start = self.position;
        let Some(c) = self.peek() else {
            return Ok(None);
        };

        let token = match c {
            b'/' if self.peek_at(1) == Some(b'/') => self.line_comment(start),
            b'/' if self.peek_at(1) == Some(b'*') => self.block_comment(start)?,
            b'"' if self.rest().starts_with("\"\"\"") => self.raw_string(start)?,
            b'"' => self.string(start)?,
            b'\'' => self.char_literal(start)?,
            b'`' => self.backtick_ident(start)?,
            b'0'..=b'9' => self.number(start),
            c if is_ident_start(c) => self.ident(start),
            _ => self.symbol(start),
        };
        Ok(Some(token))
    }

    fn line_comment(&mut self, start: usize) -> Token {
        while let Some(c) = self.peek() {
            if c == b'\n' {
                break;
            }
            self.position += 1;
        }
        Token {
            kind: TokenKind::LineComment,
            span: Span::new(start, self.position),
        }
    }

    fn block_comment(&mut self, start: usize) -> Result<Token, LexError> {
        // Kotlin block comments nest; compare bytes, the comment body may
        // hold multi-byte characters
        self.position += 2;
        let mut depth = 1usize;
        while self.position < self.input.len() {
            if self.input[self.position..].starts_with(b"/*") {
                depth += 1;
                self.position += 2;
            } else if self.input[self.position..].starts_with(b"*/") {
                depth -= 1;
                self.position += 2;
                if depth == 0 {
                    return Ok(Token {
                        kind: TokenKind::BlockComment,
                        span: Span::new(start, self.position),
                    });
                }
            } else {
                self.position += 1;
            }
        }
        Err(LexError::UnterminatedComment { offset: start })
    }

    fn raw_string(&mut self, start: usize) -> Result<Token, LexError> {
        self.position += 3;
        while self.position < self.input.len() {
            if self.input[self.position..].starts_with(b"\"\"\"") {
                self.position += 3;
                // closing quotes may be followed by extra quotes that
                // belong to the content
                while self.peek() == Some(b'"') {
                    self.position += 1;
                }
                return Ok(Token {
                    kind: TokenKind::RawStr,
                    span: Span::new(start, self.position),
                });
            }
            self.position += 1;
        }
        Err(LexError::UnterminatedRawString { offset: start })
    }

    fn string(&mut self, start: usize) -> Result<Token, LexError> {
        self.position += 1;
        while let Some(c) = self.peek() {
            match c {
                b'\\' => self.position += 2,
                b'"' => {
                    self.position += 1;
                    return Ok(Token {
                        kind: TokenKind::Str,
                        span: Span::new(start, self.position),
                    });
                }
                b'\n' => break,
                b'$' if self.peek_at(1) == Some(b'{') => {
                    self.position += 2;
                    self.template_expression(start)?;
                }
                _ => self.position += 1,
            }
        }
        Err(LexError::UnterminatedString { offset: start })
    }

    /// Skip a `${...}` template body, tracking nested braces and strings
    fn template_expression(&mut self, string_start: usize) -> Result<(), LexError> {
        let mut depth = 1usize;
        while let Some(c) = self.peek() {
            match c {
                b'{' => {
                    depth += 1;
                    self.position += 1;
                }
                b'}' => {
                    depth -= 1;
                    self.position += 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                b'"' => self.nested_string(string_start)?,
                b'\\' => self.position += 2,
                _ => self.position += 1,
            }
        }
        Err(LexError::UnterminatedString {
            offset: string_start,
        })
    }

    fn nested_string(&mut self, string_start: usize) -> Result<(), LexError> {
        self.position += 1;
        while let Some(c) = self.peek() {
            match c {
                b'\\' => self.position += 2,
                b'"' => {
                    self.position += 1;
                    return Ok(());
                }
                _ => self.position += 1,
            }
        }
        Err(LexError::UnterminatedString {
            offset: string_start,
        })
    }

    fn char_literal(&mut self, start: usize) -> Result<Token, LexError> {
        self.position += 1;
        while let Some(c) = self.peek() {
            match c {
                b'\\' => self.position += 2,
                b'\'' => {
                    self.position += 1;
                    return Ok(Token {
                        kind: TokenKind::CharLit,
                        span: Span::new(start, self.position),
                    });
                }
                b'\n' => break,
                _ => self.position += 1,
            }
        }
        Err(LexError::UnterminatedCharacter { offset: start })
    }

    fn backtick_ident(&mut self, start: usize) -> Result<Token, LexError> {
        self.position += 1;
        while let Some(c) = self.peek() {
            self.position += 1;
            if c == b'`' {
                return Ok(Token {
                    kind: TokenKind::Ident,
                    span: Span::new(start, self.position),
                });
            }
        }
        // an unterminated backtick identifier reads to end of input
        Err(LexError::UnterminatedString { offset: start })
    }

    fn number(&mut self, start: usize) -> Token {
        if self.rest().starts_with("0x") || self.rest().starts_with("0X") || self.rest().starts_with("0b") || self.rest().starts_with("0B") {
            self.position += 2;
            while let Some(c) = self.peek() {
                if c.is_ascii_alphanumeric() || c == b'_' {
                    self.position += 1;
                } else {
                    break;
                }
            }
            return Token {
                kind: TokenKind::Number,
                span: Span::new(start, self.position),
            };
        }

        self.digits();
        // fraction, but not the start of a range operator
        if self.peek() == Some(b'.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            self.position += 1;
            self.digits();
        }
        if matches!(self.peek(), Some(b'e' | b'E'))
            && self
                .peek_at(1)
                .is_some_and(|c| c.is_ascii_digit() || c == b'+' || c == b'-')
        {
            self.position += 2;
            self.digits();
        }
        // type suffix: L, f, F, u, U and combinations
        while matches!(self.peek(), Some(b'L' | b'l' | b'f' | b'F' | b'u' | b'U')) {
            self.position += 1;
        }

        Token {
            kind: TokenKind::Number,
            span: Span::new(start, self.position),
        }
    }

    fn digits(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == b'_' {
                self.position += 1;
            } else {
                break;
            }
        }
    }

    fn ident(&mut self, start: usize) -> Token {
        while let Some(c) = self.peek() {
            if is_ident_char(c) {
                self.position += 1;
            } else {
                break;
            }
        }
        let span = Span::new(start, self.position);
        let kind = if KEYWORDS.contains(&span.slice(self.source)) {
            TokenKind::Keyword
        } else {
            TokenKind::Ident
        };
        Token { kind, span }
    }

    fn symbol(&mut self, start: usize) -> Token {
        for sym in SYMBOLS {
            if self.rest().starts_with(sym) {
                self.position += sym.len();
                return Token {
                    kind: TokenKind::Symbol,
                    span: Span::new(start, self.position),
                };
            }
        }
        let width = self.rest().chars().next().map_or(1, |c| c.len_utf8());
        self.position += width;
        Token {
            kind: TokenKind::Symbol,
            span: Span::new(start, self.position),
        }
    }
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c >= 0x80
}

fn is_ident_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c >= 0x80
}
