//! Recipe: pin the Kotlin JVM toolchain in a Gradle build script

use kotlinize_core::{Edit, ExecutionContext, Recipe, RecipeError, SourceTree, TreeVisitor};
use kotlinize_syntax::kotlin::TokenKind;
use kotlinize_syntax::GradleSource;

/// Appends `kotlin { jvmToolchain(N) }` to a build script that has no
/// top-level `kotlin` invocation
///
/// Works for both the Groovy and the Kotlin DSL; the check is a depth-0
/// token scan, so a `kotlin` block nested inside another block does not
/// count as configured.
pub struct AddKotlinJvmToolchain {
    jvm_version: u32,
}

impl AddKotlinJvmToolchain {
    pub fn new(jvm_version: u32) -> Self {
        Self { jvm_version }
    }
}

impl Default for AddKotlinJvmToolchain {
    fn default() -> Self {
        Self::new(21)
    }
}

impl Recipe for AddKotlinJvmToolchain {
    fn display_name(&self) -> &'static str {
        "Add Kotlin JVM toolchain to Gradle"
    }

    fn description(&self) -> &'static str {
        "Adds a `kotlin { jvmToolchain(...) }` block to the build script."
    }

    fn visitor(&self) -> Box<dyn TreeVisitor> {
        Box::new(ToolchainVisitor {
            jvm_version: self.jvm_version,
        })
    }
}

struct ToolchainVisitor {
    jvm_version: u32,
}

impl TreeVisitor for ToolchainVisitor {
    fn visit(
        &mut self,
        tree: &dyn SourceTree,
        _ctx: &mut ExecutionContext,
    ) -> Result<Vec<Edit>, RecipeError> {
        let Some(unit) = tree.as_any().downcast_ref::<GradleSource>() else {
            return Ok(Vec::new());
        };
        if has_kotlin_invocation(unit) {
            return Ok(Vec::new());
        }

        let text = unit.printed();
        let separator = if text.is_empty() {
            ""
        } else if text.ends_with('\n') {
            "\n"
        } else {
            "\n\n"
        };
        let block = format!(
            "{separator}kotlin {{\n    jvmToolchain({})\n}}\n",
            self.jvm_version
        );

        Ok(vec![Edit::insert(
            text.len(),
            block,
            "Add kotlin jvmToolchain block",
        )])
    }
}

/// Whether a `kotlin` call or block exists at the script's top level
fn has_kotlin_invocation(unit: &GradleSource) -> bool {
    let text = unit.printed();
    let tokens = unit.tokens();
    let mut depth: usize = 0;

    for (i, token) in tokens.iter().enumerate() {
        if token.kind == TokenKind::Symbol {
            match token.text(text) {
                "{" | "(" | "[" => depth += 1,
                "}" | ")" | "]" => depth = depth.saturating_sub(1),
                _ => {}
            }
            continue;
        }
        if depth == 0 && token.kind == TokenKind::Ident && token.text(text) == "kotlin" {
            if let Some(next) = tokens.get(i + 1) {
                if next.kind == TokenKind::Symbol && matches!(next.text(text), "{" | "(") {
                    return true;
                }
            }
        }
    }
    false
}
