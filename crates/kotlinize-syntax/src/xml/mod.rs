//! Lossless, spanned XML document model for build files

mod lexer;
mod parser;

pub use lexer::{Token, TokenKind};
pub use parser::{detect_indent_unit, Attribute, Content, Document, Tag, XmlError};
