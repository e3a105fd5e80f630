//! Recipe and visitor traits plus the driver that runs them

use std::any::Any;

use thiserror::Error;

use crate::context::ExecutionContext;
use crate::edit::{apply_edits, Edit, EditError};

/// Errors surfaced while driving a recipe
///
/// Recipes raise none of their own: a missed precondition is a silent
/// no-op. Everything here is a host-layer failure.
#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("edit application failed: {0}")]
    Edit(#[from] EditError),

    #[error("parse failed: {0}")]
    Parse(String),

    #[error("recipe run was cancelled")]
    Cancelled,
}

/// The language a source tree was parsed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Maven,
    Kotlin,
    Gradle,
}

/// A parsed, read-only source tree
///
/// Concrete trees live in `kotlinize-syntax`; visitors that only apply to
/// one kind downcast through `as_any` and treat every other tree as a
/// pass-through.
pub trait SourceTree: Any {
    fn kind(&self) -> SourceKind;

    /// The text this tree was parsed from
    fn printed(&self) -> &str;

    fn as_any(&self) -> &dyn Any;
}

/// A traversal producing edits over a source tree
///
/// Visitors may enqueue follow-up visitors on the context; the driver runs
/// those after applying the current visit's edits. A visitor whose target
/// property already holds must return no edits.
pub trait TreeVisitor: Send {
    fn visit(
        &mut self,
        tree: &dyn SourceTree,
        ctx: &mut ExecutionContext,
    ) -> Result<Vec<Edit>, RecipeError>;
}

/// A named, reusable transformation
pub trait Recipe: Send + Sync {
    fn display_name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Build a fresh visitor for one source file
    fn visitor(&self) -> Box<dyn TreeVisitor>;
}

/// Run `recipe` over `source`, returning the transformed text
///
/// Parsing is injected: the caller decides how text becomes a tree. The
/// driver applies the main visit, then drains the deferred-visitor queue,
/// re-parsing the current text before each deferred visitor so their edits
/// compose. Cancellation is checked before every visitor.
pub fn run_recipe(
    recipe: &dyn Recipe,
    source: &str,
    ctx: &mut ExecutionContext,
    parse: impl Fn(&str) -> Result<Box<dyn SourceTree>, RecipeError>,
) -> Result<String, RecipeError> {
    let mut current = source.to_string();

    ctx.check_cancelled()?;
    let tree = parse(&current)?;
    let mut visitor = recipe.visitor();
    let edits = visitor.visit(tree.as_ref(), ctx)?;
    if !edits.is_empty() {
        current = apply_edits(&current, &edits)?;
    }

    while let Some(mut deferred) = ctx.pop_after_visit() {
        ctx.check_cancelled()?;
        let tree = parse(&current)?;
        let edits = deferred.visit(tree.as_ref(), ctx)?;
        if !edits.is_empty() {
            current = apply_edits(&current, &edits)?;
        }
    }

    Ok(current)
}
