//! Before/after assertion harness for recipe tests

use crate::context::ExecutionContext;
use crate::recipe::{run_recipe, Recipe, RecipeError, SourceTree};

/// Assert that `recipe` rewrites `before` into `after`
///
/// Also applies the recipe a second time to its own output and asserts the
/// fixed point: every recipe must be a no-op once its target property
/// holds. Passing `before == after` asserts the recipe leaves the input
/// untouched.
pub fn rewrite_run(
    recipe: &dyn Recipe,
    parse: impl Fn(&str) -> Result<Box<dyn SourceTree>, RecipeError>,
    before: &str,
    after: &str,
) {
    let mut ctx = ExecutionContext::new();
    let out = run_recipe(recipe, before, &mut ctx, &parse)
        .unwrap_or_else(|e| panic!("recipe '{}' failed: {e}", recipe.display_name()));
    assert_eq!(out, after, "unexpected rewrite from '{}'", recipe.display_name());

    let mut ctx = ExecutionContext::new();
    let again = run_recipe(recipe, &out, &mut ctx, &parse)
        .unwrap_or_else(|e| panic!("recipe '{}' failed on own output: {e}", recipe.display_name()));
    assert_eq!(
        again, out,
        "'{}' is not a fixed point on its own output",
        recipe.display_name()
    );
}
