//! Recipe registry

use kotlinize_core::Recipe;
use kotlinize_fixer::FormatKotlinSources;

use crate::add_kotlin_jvm_toolchain::AddKotlinJvmToolchain;
use crate::add_kotlin_source_folders::AddKotlinSourceFolders;

/// Registry of all available recipes
pub struct RecipeRegistry {
    recipes: Vec<Box<dyn Recipe>>,
}

impl RecipeRegistry {
    /// Create a new registry with all built-in recipes
    pub fn new() -> Self {
        let mut registry = Self {
            recipes: Vec::new(),
        };

        registry.register(Box::new(AddKotlinSourceFolders));
        registry.register(Box::new(AddKotlinJvmToolchain::default()));
        registry.register(Box::new(FormatKotlinSources));

        registry
    }

    /// Register a new recipe
    pub fn register(&mut self, recipe: Box<dyn Recipe>) {
        self.recipes.push(recipe);
    }

    /// Get all recipe display names
    pub fn all_names(&self) -> Vec<&'static str> {
        self.recipes.iter().map(|r| r.display_name()).collect()
    }

    /// Look up a recipe by display name
    pub fn get(&self, name: &str) -> Option<&dyn Recipe> {
        self.recipes
            .iter()
            .find(|r| r.display_name() == name)
            .map(|r| r.as_ref())
    }

    /// All recipes with their descriptions
    pub fn list(&self) -> Vec<(&'static str, &'static str)> {
        self.recipes
            .iter()
            .map(|r| (r.display_name(), r.description()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl Default for RecipeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_recipes() {
        let registry = RecipeRegistry::new();
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_get_by_name() {
        let registry = RecipeRegistry::new();
        assert!(registry.get("Add Kotlin source folders to Maven").is_some());
        assert!(registry.get("Format Kotlin sources").is_some());
        assert!(registry.get("No such recipe").is_none());
    }

    #[test]
    fn test_list_has_descriptions() {
        let registry = RecipeRegistry::new();
        for (name, description) in registry.list() {
            assert!(!name.is_empty());
            assert!(!description.is_empty());
        }
    }
}
