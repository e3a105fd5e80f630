//! kotlinize-recipes: Built-in recipe implementations
//!
//! Available recipes:
//! - add_kotlin_source_folders: declare `src/main/kotlin` and
//!   `src/test/kotlin` in a Maven POM's `build` section
//! - add_kotlin_jvm_toolchain: pin `kotlin { jvmToolchain(...) }` in a
//!   Gradle build script
//! - the whole-file Kotlin formatter, re-exported from `kotlinize-fixer`
//!   through the registry

pub mod add_kotlin_jvm_toolchain;
pub mod add_kotlin_source_folders;
pub mod add_to_tag;
mod registry;

pub use add_kotlin_jvm_toolchain::AddKotlinJvmToolchain;
pub use add_kotlin_source_folders::AddKotlinSourceFolders;
pub use add_to_tag::AddToTagVisitor;
pub use registry::RecipeRegistry;
