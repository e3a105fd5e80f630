//! XML parser - builds a spanned element tree over the original text

use kotlinize_core::Span;
use thiserror::Error;

use super::lexer::{Lexer, Token, TokenKind};

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("unexpected character '{character}' at offset {offset}")]
    UnexpectedCharacter { character: char, offset: usize },

    #[error("unexpected token at offset {offset}: expected {expected}")]
    UnexpectedToken { offset: usize, expected: String },

    #[error("closing tag </{found}> at offset {offset} does not match <{expected}>")]
    MismatchedClosingTag {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("unterminated comment at offset {offset}")]
    UnterminatedComment { offset: usize },

    #[error("unterminated attribute value at offset {offset}")]
    UnterminatedAttributeValue { offset: usize },

    #[error("document has no root element")]
    MissingRoot,

    #[error("unexpected end of input")]
    UnexpectedEof,
}

/// An attribute inside a start tag
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    /// Span of the quoted value, quotes included
    pub value_span: Span,
}

/// One ordered child of an element
#[derive(Debug, Clone)]
pub enum Content {
    Tag(Tag),
    Text(Span),
    Comment(Span),
}

/// An element, with spans pointing back into the parsed text
#[derive(Debug, Clone)]
pub struct Tag {
    pub name: String,
    /// The whole element, opening `<` through closing `>`
    pub span: Span,
    /// The start tag only
    pub open_span: Span,
    /// The end tag, absent for self-closing elements
    pub close_span: Option<Span>,
    pub self_closing: bool,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Content>,
}

impl Tag {
    /// First child element with the given local name
    pub fn child(&self, name: &str) -> Option<&Tag> {
        self.tags().find(|t| t.name == name)
    }

    /// All child elements with the given local name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Tag> {
        self.tags().filter(move |t| t.name == name)
    }

    /// All child elements, in document order
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.children.iter().filter_map(|c| match c {
            Content::Tag(tag) => Some(tag),
            _ => None,
        })
    }

    /// Concatenated, trimmed character data directly under this element
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        for child in &self.children {
            if let Content::Text(span) = child {
                let trimmed = span.slice(source).trim();
                if !trimmed.is_empty() {
                    return trimmed;
                }
            }
        }
        ""
    }

    /// End offset of the last tag or comment child, or of the start tag
    ///
    /// This is where new content is appended; trailing whitespace up to the
    /// closing tag belongs to the indentation of the close.
    pub fn last_content_end(&self) -> usize {
        self.children
            .iter()
            .rev()
            .find_map(|c| match c {
                Content::Tag(tag) => Some(tag.span.end),
                Content::Comment(span) => Some(span.end),
                Content::Text(_) => None,
            })
            .unwrap_or(self.open_span.end)
    }
}

/// A parsed document; prolog, doctype and top-level comments are consumed
/// but not modelled
#[derive(Debug, Clone)]
pub struct Document {
    pub root: Tag,
}

impl Document {
    pub fn parse(source: &str) -> Result<Document, XmlError> {
        let tokens = Lexer::new(source).tokenize()?;
        let mut parser = Parser {
            tokens,
            position: 0,
        };
        parser.parse_document()
    }
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // tokenize() always terminates the stream with Eof
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
        token
    }

    fn parse_document(&mut self) -> Result<Document, XmlError> {
        let mut root = None;

        loop {
            match self.peek().kind.clone() {
                TokenKind::Eof => break,
                TokenKind::Prolog | TokenKind::Comment | TokenKind::Decl | TokenKind::Text => {
                    self.advance();
                }
                TokenKind::LAngle => {
                    let tag = self.parse_element()?;
                    if root.is_none() {
                        root = Some(tag);
                    }
                }
                _ => {
                    let token = self.advance();
                    return Err(XmlError::UnexpectedToken {
                        offset: token.span.start,
                        expected: "element, comment or prolog".to_string(),
                    });
                }
            }
        }

        root.map(|root| Document { root }).ok_or(XmlError::MissingRoot)
    }

    fn parse_element(&mut self) -> Result<Tag, XmlError> {
        let open = self.expect(|k| matches!(k, TokenKind::LAngle), "'<'")?;
        let name_token = self.expect(|k| matches!(k, TokenKind::Name(_)), "element name")?;
        let TokenKind::Name(name) = name_token.kind else {
            unreachable!("expect() matched a name token");
        };

        let mut attributes = Vec::new();
        loop {
            match self.peek().kind.clone() {
                TokenKind::Name(_) => {
                    let attr_token = self.advance();
                    let TokenKind::Name(attr_name) = attr_token.kind else {
                        unreachable!("matched a name token");
                    };
                    self.expect(|k| matches!(k, TokenKind::Eq), "'='")?;
                    let value = self.expect(|k| matches!(k, TokenKind::Value(_)), "attribute value")?;
                    attributes.push(Attribute {
                        name: attr_name,
                        value_span: value.span,
                    });
                }
                TokenKind::SlashRAngle => {
                    let end = self.advance();
                    let span = Span::new(open.span.start, end.span.end);
                    return Ok(Tag {
                        name,
                        span,
                        open_span: span,
                        close_span: None,
                        self_closing: true,
                        attributes,
                        children: Vec::new(),
                    });
                }
                TokenKind::RAngle => {
                    let end = self.advance();
                    let open_span = Span::new(open.span.start, end.span.end);
                    return self.parse_children(name, open.span.start, open_span, attributes);
                }
                _ => {
                    let token = self.advance();
                    return Err(XmlError::UnexpectedToken {
                        offset: token.span.start,
                        expected: "attribute, '>' or '/>'".to_string(),
                    });
                }
            }
        }
    }

    fn parse_children(
        &mut self,
        name: String,
        start: usize,
        open_span: Span,
        attributes: Vec<Attribute>,
    ) -> Result<Tag, XmlError> {
        let mut children = Vec::new();

        loop {
            match self.peek().kind.clone() {
                TokenKind::Text => {
                    let token = self.advance();
                    children.push(Content::Text(token.span));
                }
                TokenKind::Comment => {
                    let token = self.advance();
                    children.push(Content::Comment(token.span));
                }
                TokenKind::LAngle => {
                    children.push(Content::Tag(self.parse_element()?));
                }
                TokenKind::LAngleSlash => {
                    let close_open = self.advance();
                    let close_name = self.expect(|k| matches!(k, TokenKind::Name(_)), "closing name")?;
                    let TokenKind::Name(found) = close_name.kind else {
                        unreachable!("expect() matched a name token");
                    };
                    if found != name {
                        return Err(XmlError::MismatchedClosingTag {
                            expected: name,
                            found,
                            offset: close_open.span.start,
                        });
                    }
                    let close_end = self.expect(|k| matches!(k, TokenKind::RAngle), "'>'")?;
                    let close_span = Span::new(close_open.span.start, close_end.span.end);
                    return Ok(Tag {
                        name,
                        span: Span::new(start, close_span.end),
                        open_span,
                        close_span: Some(close_span),
                        self_closing: false,
                        attributes,
                        children,
                    });
                }
                TokenKind::Eof => return Err(XmlError::UnexpectedEof),
                _ => {
                    let token = self.advance();
                    return Err(XmlError::UnexpectedToken {
                        offset: token.span.start,
                        expected: "child content or closing tag".to_string(),
                    });
                }
            }
        }
    }

    fn expect(
        &mut self,
        matches: impl Fn(&TokenKind) -> bool,
        expected: &str,
    ) -> Result<Token, XmlError> {
        let token = self.peek();
        if matches!(token.kind, TokenKind::Eof) {
            return Err(XmlError::UnexpectedEof);
        }
        if matches(&token.kind) {
            Ok(self.advance())
        } else {
            Err(XmlError::UnexpectedToken {
                offset: token.span.start,
                expected: expected.to_string(),
            })
        }
    }
}

/// Indentation width of one nesting level, inferred from the document
///
/// Returns the leading-space count of the first indented element line,
/// falling back to 2, the width conventional in Maven POMs.
pub fn detect_indent_unit(source: &str) -> usize {
    for line in source.lines() {
        let trimmed = line.trim_start_matches(' ');
        if trimmed.starts_with('<') && trimmed.len() < line.len() {
            return line.len() - trimmed.len();
        }
    }
    2
}
