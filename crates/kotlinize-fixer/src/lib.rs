//! kotlinize-fixer: IntelliJ-compatible formatting for Kotlin sources
//!
//! This crate provides the formatting half of kotlinize:
//!
//! - Style types with the stock IntelliJ default profiles
//! - Seven formatting passes, each a `FormatPass` over a lexed unit
//! - `AutoFormat`, the whole-file composite that chains the passes and
//!   leaves non-Kotlin trees untouched
//!
//! # Example
//!
//! ```ignore
//! use kotlinize_core::ExecutionContext;
//! use kotlinize_fixer::AutoFormat;
//! use kotlinize_syntax::KotlinSource;
//!
//! let unit = KotlinSource::parse(source)?;
//! let formatted = AutoFormat::new().format(&unit, &ExecutionContext::new())?;
//! ```

mod format;
pub mod passes;
pub mod styles;

pub use format::{AutoFormat, FormatKotlinSources};
pub use styles::Styles;
