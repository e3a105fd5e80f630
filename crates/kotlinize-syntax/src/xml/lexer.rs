//! XML lexer - tokenizes markup into spanned tokens

use kotlinize_core::Span;

use super::parser::XmlError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `<` opening a start tag
    LAngle,
    /// `</` opening an end tag
    LAngleSlash,
    /// `>` closing a tag
    RAngle,
    /// `/>` closing a self-closing tag
    SlashRAngle,
    /// An element or attribute name
    Name(String),
    /// `=` between an attribute name and its value
    Eq,
    /// A quoted attribute value, quotes included in the span
    Value(String),
    /// Character data between tags
    Text,
    /// `<!-- ... -->`
    Comment,
    /// `<? ... ?>`
    Prolog,
    /// `<! ... >` declarations (DOCTYPE and friends)
    Decl,
    /// End of input
    Eof,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

pub struct Lexer<'a> {
    input: &'a [u8],
    source: &'a str,
    position: usize,
    /// Inside `<...>`, names/values/`=` are tokens; outside, runs are text
    in_tag: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            input: source.as_bytes(),
            source,
            position: 0,
            in_tag: false,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, XmlError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.input.get(self.position + ahead).copied()
    }

    fn next_token(&mut self) -> Result<Token, XmlError> {
        if self.in_tag {
            self.skip_whitespace();
        }

        let start = self.position;
        let Some(ch) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, Span::point(start)));
        };

        if self.in_tag {
            return self.tag_token(start, ch);
        }

        match ch {
            b'<' => match self.peek_at(1) {
                Some(b'/') => {
                    self.position += 2;
                    self.in_tag = true;
                    Ok(Token::new(TokenKind::LAngleSlash, Span::new(start, self.position)))
                }
                Some(b'!') => {
                    if self.source[self.position..].starts_with("<!--") {
                        self.comment(start)
                    } else {
                        self.declaration(start)
                    }
                }
                Some(b'?') => self.prolog(start),
                _ => {
                    self.position += 1;
                    self.in_tag = true;
                    Ok(Token::new(TokenKind::LAngle, Span::new(start, self.position)))
                }
            },
            _ => {
                while let Some(c) = self.peek() {
                    if c == b'<' {
                        break;
                    }
                    self.position += 1;
                }
                Ok(Token::new(TokenKind::Text, Span::new(start, self.position)))
            }
        }
    }

    fn tag_token(&mut self, start: usize, ch: u8) -> Result<Token, XmlError> {
        match ch {
            b'>' => {
                self.position += 1;
                self.in_tag = false;
                Ok(Token::new(TokenKind::RAngle, Span::new(start, self.position)))
            }
            b'/' if self.peek_at(1) == Some(b'>') => {
                self.position += 2;
                self.in_tag = false;
                Ok(Token::new(TokenKind::SlashRAngle, Span::new(start, self.position)))
            }
            b'=' => {
                self.position += 1;
                Ok(Token::new(TokenKind::Eq, Span::new(start, self.position)))
            }
            b'"' | b'\'' => {
                let quote = ch;
                self.position += 1;
                while let Some(c) = self.peek() {
                    self.position += 1;
                    if c == quote {
                        let span = Span::new(start, self.position);
                        let value = span.slice(self.source).to_string();
                        return Ok(Token::new(TokenKind::Value(value), span));
                    }
                }
                Err(XmlError::UnterminatedAttributeValue { offset: start })
            }
            c if is_name_start(c) => {
                while let Some(c) = self.peek() {
                    if is_name_char(c) {
                        self.position += 1;
                    } else {
                        break;
                    }
                }
                let span = Span::new(start, self.position);
                let name = span.slice(self.source).to_string();
                Ok(Token::new(TokenKind::Name(name), span))
            }
            _ => Err(XmlError::UnexpectedCharacter {
                character: ch as char,
                offset: start,
            }),
        }
    }

    fn comment(&mut self, start: usize) -> Result<Token, XmlError> {
        // past "<!--"
        self.position += 4;
        while self.position < self.input.len() {
            if self.source[self.position..].starts_with("-->") {
                self.position += 3;
                return Ok(Token::new(TokenKind::Comment, Span::new(start, self.position)));
            }
            self.position += 1;
        }
        Err(XmlError::UnterminatedComment { offset: start })
    }

    fn prolog(&mut self, start: usize) -> Result<Token, XmlError> {
        // past "<?"
        self.position += 2;
        while self.position < self.input.len() {
            if self.source[self.position..].starts_with("?>") {
                self.position += 2;
                return Ok(Token::new(TokenKind::Prolog, Span::new(start, self.position)));
            }
            self.position += 1;
        }
        Err(XmlError::UnexpectedEof)
    }

    fn declaration(&mut self, start: usize) -> Result<Token, XmlError> {
        // past "<!"; declarations may nest brackets (DOCTYPE internal subset)
        self.position += 2;
        let mut depth = 0usize;
        while let Some(c) = self.peek() {
            self.position += 1;
            match c {
                b'[' => depth += 1,
                b']' => depth = depth.saturating_sub(1),
                b'>' if depth == 0 => {
                    return Ok(Token::new(TokenKind::Decl, Span::new(start, self.position)));
                }
                _ => {}
            }
        }
        Err(XmlError::UnexpectedEof)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.position += 1;
            } else {
                break;
            }
        }
    }
}

fn is_name_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, b'_' | b'-' | b'.' | b':')
}
