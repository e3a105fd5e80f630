//! Style bundles attached to source units

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// A mapping from style-kind identifiers to style values
///
/// A source unit carries at most one style per kind. Lookups that miss
/// fall back to a default profile at the call site, so an empty set is a
/// valid bundle meaning "all defaults".
#[derive(Clone, Default)]
pub struct StyleSet {
    entries: HashMap<&'static str, Arc<dyn Any + Send + Sync>>,
}

impl StyleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `style` under `kind`, replacing any previous binding
    pub fn with<T: Any + Send + Sync>(mut self, kind: &'static str, style: T) -> Self {
        self.entries.insert(kind, Arc::new(style));
        self
    }

    /// The style bound under `kind`, if one of the expected type exists
    pub fn get<T: Any + Send + Sync>(&self, kind: &str) -> Option<&T> {
        self.entries.get(kind)?.downcast_ref::<T>()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for StyleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleSet")
            .field("kinds", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct IndentWidth(usize);

    #[test]
    fn test_get_bound_style() {
        let styles = StyleSet::new().with("indent", IndentWidth(2));
        assert_eq!(styles.get::<IndentWidth>("indent"), Some(&IndentWidth(2)));
    }

    #[test]
    fn test_missing_kind_is_none() {
        let styles = StyleSet::new();
        assert_eq!(styles.get::<IndentWidth>("indent"), None);
    }

    #[test]
    fn test_wrong_type_is_none() {
        let styles = StyleSet::new().with("indent", "two");
        assert_eq!(styles.get::<IndentWidth>("indent"), None);
    }

    #[test]
    fn test_rebinding_replaces() {
        let styles = StyleSet::new()
            .with("indent", IndentWidth(2))
            .with("indent", IndentWidth(4));
        assert_eq!(styles.get::<IndentWidth>("indent"), Some(&IndentWidth(4)));
    }
}
