//! Built-in snippets.

mod configuration_type;

pub use configuration_type::ConfigurationType;
use weave_codegen::snippet::SnippetRegistry;

/// Registry holding every built-in snippet.
pub fn builtin() -> SnippetRegistry {
    SnippetRegistry::new().with(ConfigurationType)
}
