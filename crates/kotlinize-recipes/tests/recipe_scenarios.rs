//! End-to-end scenarios for the built-in recipes, driven through the
//! registry and the recipe driver

use kotlinize_core::testing::rewrite_run;
use kotlinize_core::{run_recipe, ExecutionContext, RecipeError};
use kotlinize_recipes::RecipeRegistry;
use kotlinize_syntax::{parse_kotlin, parse_maven};

const SEED_POM: &str = "\
<project>
  <groupId>com.mycompany.app</groupId>
  <artifactId>my-app</artifactId>
  <version>1</version>
  <build>
  </build>
</project>
";

const SEED_POM_EXPECTED: &str = "\
<project>
  <groupId>com.mycompany.app</groupId>
  <artifactId>my-app</artifactId>
  <version>1</version>
  <build>
    <sourceDirectory>${project.basedir}/src/main/kotlin</sourceDirectory>
    <testSourceDirectory>${project.basedir}/src/test/kotlin</testSourceDirectory>
  </build>
</project>
";

#[test]
fn test_source_folders_recipe_from_registry() {
    let registry = RecipeRegistry::new();
    let recipe = registry.get("Add Kotlin source folders to Maven").unwrap();
    rewrite_run(recipe, parse_maven, SEED_POM, SEED_POM_EXPECTED);
}

#[test]
fn test_toolchain_recipe_from_registry() {
    let registry = RecipeRegistry::new();
    let recipe = registry.get("Add Kotlin JVM toolchain to Gradle").unwrap();
    rewrite_run(
        recipe,
        kotlinize_syntax::parse_gradle,
        "plugins {\n    id 'java'\n}\n",
        "plugins {\n    id 'java'\n}\n\nkotlin {\n    jvmToolchain(21)\n}\n",
    );
}

#[test]
fn test_format_recipe_from_registry() {
    let registry = RecipeRegistry::new();
    let recipe = registry.get("Format Kotlin sources").unwrap();
    rewrite_run(
        recipe,
        parse_kotlin,
        "fun main(){\nval greeting=\"hi\"\nprintln(greeting)\n}\n",
        "fun main() {\n    val greeting = \"hi\"\n    println(greeting)\n}\n",
    );
}

#[test]
fn test_pom_recipe_ignores_kotlin_sources() {
    // the driver may hand any tree kind to any recipe; wrong kinds pass
    // through byte-identical
    let registry = RecipeRegistry::new();
    let recipe = registry.get("Add Kotlin source folders to Maven").unwrap();
    let source = "fun main() {}\n";
    rewrite_run(recipe, parse_kotlin, source, source);
}

#[test]
fn test_format_recipe_ignores_pom() {
    let registry = RecipeRegistry::new();
    let recipe = registry.get("Format Kotlin sources").unwrap();
    let source = "<project>\n  <build>\n  </build>\n</project>\n";
    rewrite_run(recipe, parse_maven, source, source);
}

#[test]
fn test_cancelled_context_stops_run() {
    let registry = RecipeRegistry::new();
    let recipe = registry.get("Add Kotlin source folders to Maven").unwrap();

    let mut ctx = ExecutionContext::new();
    ctx.cancellation_flag()
        .store(true, std::sync::atomic::Ordering::Relaxed);
    let result = run_recipe(recipe, SEED_POM, &mut ctx, parse_maven);
    assert!(matches!(result, Err(RecipeError::Cancelled)));
}

#[test]
fn test_malformed_pom_reported_by_parse() {
    let registry = RecipeRegistry::new();
    let recipe = registry.get("Add Kotlin source folders to Maven").unwrap();

    let mut ctx = ExecutionContext::new();
    let result = run_recipe(recipe, "<project><build></project>", &mut ctx, parse_maven);
    assert!(matches!(result, Err(RecipeError::Parse(_))));
}
