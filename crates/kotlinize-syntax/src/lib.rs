//! kotlinize-syntax: Parsers and source units for kotlinize recipes
//!
//! This crate provides:
//! - `xml`: a lossless, spanned XML document model for POM files
//! - `kotlin`: a Kotlin token lexer for the formatting passes
//! - Source units (`MavenDocument`, `KotlinSource`, `GradleSource`)
//!   implementing the `SourceTree` contract, plus parse callbacks for the
//!   recipe driver

pub mod kotlin;
mod unit;
pub mod xml;

pub use unit::{
    parse_gradle, parse_kotlin, parse_maven, GradleSource, KotlinSource, MavenDocument,
};
