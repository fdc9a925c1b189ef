use indexmap::IndexMap;

use super::Snippet;
use crate::{Error, Result};

/// Snippets available to a front end, by name.
#[derive(Default)]
pub struct SnippetRegistry {
    snippets: IndexMap<&'static str, Box<dyn Snippet>>,
}

impl SnippetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a snippet, replacing one with the same name.
    pub fn register(&mut self, snippet: impl Snippet + 'static) {
        self.snippets.insert(snippet.name(), Box::new(snippet));
    }

    pub fn with(mut self, snippet: impl Snippet + 'static) -> Self {
        self.register(snippet);
        self
    }

    pub fn get(&self, name: &str) -> Result<&dyn Snippet> {
        self.snippets
            .get(name)
            .map(|s| s.as_ref())
            .ok_or_else(|| Error::UnknownSnippet {
                name: name.to_string(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.snippets.contains_key(name)
    }

    /// Snippets in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Snippet> {
        self.snippets.values().map(|s| s.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.snippets.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}

impl std::fmt::Debug for SnippetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.snippets.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        module::Module,
        snippet::{ParamDescriptor, ParamValues},
    };

    struct Noop;

    impl Snippet for Noop {
        fn name(&self) -> &'static str {
            "noop"
        }

        fn label(&self) -> &'static str {
            "Noop"
        }

        fn params(&self) -> Vec<ParamDescriptor> {
            Vec::new()
        }

        fn add(&self, _module: &mut Module, _values: &ParamValues) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_lookup() {
        let registry = SnippetRegistry::new().with(Noop);
        assert!(registry.contains("noop"));
        assert_eq!(registry.get("noop").unwrap().label(), "Noop");
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["noop"]);
    }

    #[test]
    fn test_unknown_snippet() {
        let registry = SnippetRegistry::new();
        let err = registry.get("missing").err().unwrap();
        assert!(matches!(err, Error::UnknownSnippet { ref name } if name == "missing"));
    }
}
