//! Concrete source units handed to recipe visitors

use std::any::Any;

use kotlinize_core::{RecipeError, SourceKind, SourceTree, StyleSet};

use crate::kotlin::{self, Token};
use crate::xml::{Document, XmlError};

/// A parsed Maven POM (or any XML document)
pub struct MavenDocument {
    text: String,
    document: Document,
}

impl MavenDocument {
    pub fn parse(text: impl Into<String>) -> Result<Self, XmlError> {
        let text = text.into();
        let document = Document::parse(&text)?;
        Ok(Self { text, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl SourceTree for MavenDocument {
    fn kind(&self) -> SourceKind {
        SourceKind::Maven
    }

    fn printed(&self) -> &str {
        &self.text
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A lexed Kotlin source file with its attached style bundle
pub struct KotlinSource {
    text: String,
    tokens: Vec<Token>,
    styles: StyleSet,
}

impl KotlinSource {
    pub fn parse(text: impl Into<String>) -> Result<Self, kotlin::LexError> {
        let text = text.into();
        let tokens = kotlin::lex(&text)?;
        Ok(Self {
            text,
            tokens,
            styles: StyleSet::new(),
        })
    }

    pub fn with_styles(mut self, styles: StyleSet) -> Self {
        self.styles = styles;
        self
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn styles(&self) -> &StyleSet {
        &self.styles
    }
}

impl SourceTree for KotlinSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Kotlin
    }

    fn printed(&self) -> &str {
        &self.text
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A lexed Gradle build script (`build.gradle` or `build.gradle.kts`)
pub struct GradleSource {
    text: String,
    tokens: Vec<Token>,
}

impl GradleSource {
    pub fn parse(text: impl Into<String>) -> Result<Self, kotlin::LexError> {
        let text = text.into();
        let tokens = kotlin::lex(&text)?;
        Ok(Self { text, tokens })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl SourceTree for GradleSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Gradle
    }

    fn printed(&self) -> &str {
        &self.text
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Parse callback for Maven inputs, for `run_recipe` and the test harness
pub fn parse_maven(source: &str) -> Result<Box<dyn SourceTree>, RecipeError> {
    MavenDocument::parse(source)
        .map(|doc| Box::new(doc) as Box<dyn SourceTree>)
        .map_err(|e| RecipeError::Parse(e.to_string()))
}

/// Parse callback for Kotlin inputs
pub fn parse_kotlin(source: &str) -> Result<Box<dyn SourceTree>, RecipeError> {
    KotlinSource::parse(source)
        .map(|unit| Box::new(unit) as Box<dyn SourceTree>)
        .map_err(|e| RecipeError::Parse(e.to_string()))
}

/// Parse callback for Gradle build scripts
pub fn parse_gradle(source: &str) -> Result<Box<dyn SourceTree>, RecipeError> {
    GradleSource::parse(source)
        .map(|unit| Box::new(unit) as Box<dyn SourceTree>)
        .map_err(|e| RecipeError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maven_unit_round_trips_text() {
        let unit = MavenDocument::parse("<project><build/></project>").unwrap();
        assert_eq!(unit.printed(), "<project><build/></project>");
        assert_eq!(unit.kind(), SourceKind::Maven);
        assert!(unit.document().root.child("build").is_some());
    }

    #[test]
    fn test_kotlin_unit_downcast() {
        let unit = KotlinSource::parse("val x = 1").unwrap();
        let tree: &dyn SourceTree = &unit;
        assert!(tree.as_any().downcast_ref::<KotlinSource>().is_some());
        assert!(tree.as_any().downcast_ref::<MavenDocument>().is_none());
    }

    #[test]
    fn test_parse_error_reported() {
        let result = parse_maven("<project>");
        assert!(matches!(result, Err(RecipeError::Parse(_))));
    }
}
