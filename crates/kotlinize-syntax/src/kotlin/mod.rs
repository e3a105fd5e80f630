//! Kotlin token model used by the formatting passes

mod lexer;

pub use lexer::{lex, LexError, Token, TokenKind};
