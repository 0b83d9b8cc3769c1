//! Host-provided functions that manifests refer to by identifier.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::traits::{Formatter, LookupFn};

/// Maps identifiers to formatter factories and legacy lookup functions.
///
/// Both share one signature, so a single table serves `factory:` and
/// `function:` references alike.
pub struct FunctionCatalog<V: ?Sized> {
    functions: HashMap<String, LookupFn<V>>,
}

impl<V: ?Sized> FunctionCatalog<V> {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Add or replace a function. Returns the function previously bound to `id`.
    pub fn insert(&mut self, id: impl Into<String>, function: LookupFn<V>) -> Option<LookupFn<V>> {
        self.functions.insert(id.into(), function)
    }

    /// Builder-style [`FunctionCatalog::insert`].
    pub fn with(
        mut self,
        id: impl Into<String>,
        function: impl Fn(&V) -> Option<Box<dyn Formatter>> + Send + Sync + 'static,
    ) -> Self {
        self.functions.insert(id.into(), Arc::new(function));
        self
    }

    pub fn get(&self, id: &str) -> Option<&LookupFn<V>> {
        self.functions.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.functions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Registered identifiers, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl<V: ?Sized> Default for FunctionCatalog<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: ?Sized> fmt::Debug for FunctionCatalog<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionCatalog")
            .field("ids", &self.ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printing::testing::{TextFormatter, TypeName, render, text_factory};

    #[test]
    fn test_insert_and_get() {
        let mut catalog = FunctionCatalog::new();
        assert!(catalog.insert("vector", text_factory("vec")).is_none());
        assert!(catalog.insert("vector", text_factory("vec2")).is_some());
        assert_eq!(catalog.len(), 1);

        let factory = catalog.get("vector").unwrap();
        assert_eq!(
            render(factory(&TypeName::new("std::vector<int>"))),
            Some("vec2".to_string())
        );
        assert!(catalog.get("map").is_none());
    }

    #[test]
    fn test_builder_and_ids() {
        let catalog = FunctionCatalog::<TypeName>::new()
            .with("b", |_: &TypeName| Some(TextFormatter::boxed("b")))
            .with("a", |_: &TypeName| None);
        assert_eq!(catalog.ids(), vec!["a", "b"]);
        assert!(catalog.contains("a"));
        assert!(!catalog.is_empty());
        assert_eq!(format!("{catalog:?}"), "FunctionCatalog { ids: [\"a\", \"b\"] }");
    }
}
