//! kotlinize-core: Host contract for span-based refactoring recipes
//!
//! This crate provides:
//! - `Span`: A byte range into source text
//! - `Edit`: A span-based code modification
//! - `apply_edits()`: Function to apply edits in reverse offset order
//! - `Recipe` / `TreeVisitor`: Traits recipes implement
//! - `run_recipe()`: Driver applying a visit plus its deferred visitors
//! - `ExecutionContext`: Per-run cancellation and deferred scheduling
//! - `StyleSet`: Style bundle attached to a source unit
//! - `testing::rewrite_run()`: Before/after harness asserting fixed points

mod context;
mod edit;
pub mod recipe;
mod span;
mod style;
pub mod testing;

pub use context::ExecutionContext;
pub use edit::{apply_edits, Edit, EditError};
pub use recipe::{run_recipe, Recipe, RecipeError, SourceKind, SourceTree, TreeVisitor};
pub use span::Span;
pub use style::StyleSet;
