//! Recipe: declare Kotlin source folders in a Maven POM

use kotlinize_core::{Edit, ExecutionContext, Recipe, RecipeError, SourceTree, TreeVisitor};
use kotlinize_syntax::MavenDocument;

use crate::add_to_tag::AddToTagVisitor;

const SOURCE_DIRECTORY: &str =
    "<sourceDirectory>${project.basedir}/src/main/kotlin</sourceDirectory>";
const TEST_SOURCE_DIRECTORY: &str =
    "<testSourceDirectory>${project.basedir}/src/test/kotlin</testSourceDirectory>";

/// Ensures a POM's `build` section declares `src/main/kotlin` and
/// `src/test/kotlin`
///
/// A POM without a `build` element is left alone: it may inherit one from
/// a parent, and synthesising a `build` here would be a guess. Existing
/// declarations are never overwritten, whatever they point at.
pub struct AddKotlinSourceFolders;

impl Recipe for AddKotlinSourceFolders {
    fn display_name(&self) -> &'static str {
        "Add Kotlin source folders to Maven"
    }

    fn description(&self) -> &'static str {
        "Adds `src/main/kotlin` and `src/test/kotlin` as source folders."
    }

    fn visitor(&self) -> Box<dyn TreeVisitor> {
        Box::new(SourceFoldersVisitor)
    }
}

struct SourceFoldersVisitor;

impl TreeVisitor for SourceFoldersVisitor {
    fn visit(
        &mut self,
        tree: &dyn SourceTree,
        ctx: &mut ExecutionContext,
    ) -> Result<Vec<Edit>, RecipeError> {
        let Some(doc) = tree.as_any().downcast_ref::<MavenDocument>() else {
            return Ok(Vec::new());
        };
        let root = &doc.document().root;
        if root.name != "project" {
            return Ok(Vec::new());
        }
        let Some(build) = root.child("build") else {
            return Ok(Vec::new());
        };

        if build.child("sourceDirectory").is_none() {
            ctx.run_after_visit(Box::new(AddToTagVisitor::new(["build"], SOURCE_DIRECTORY)));
        }
        if build.child("testSourceDirectory").is_none() {
            ctx.run_after_visit(Box::new(AddToTagVisitor::new(
                ["build"],
                TEST_SOURCE_DIRECTORY,
            )));
        }

        Ok(Vec::new())
    }
}
