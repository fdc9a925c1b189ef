//! Language-agnostic code generation traits.

use eyre::Result;

use crate::{Diagnostic, generation::FileRegistry};

/// Trait for target-language generators.
///
/// A generator assembles a module from its manifest, renders it and hands
/// back the files together with the diagnostics collected on the way.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "php")
    fn language(&self) -> &'static str;

    /// Run every snippet invocation and render the result.
    fn build(&self) -> Result<Generated>;
}

/// Rendered output of a generation run.
#[derive(Debug)]
pub struct Generated {
    /// `Vendor_Name`
    pub module_name: String,
    pub files: FileRegistry,
    pub diagnostics: Vec<Diagnostic>,
}

impl Generated {
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_warning())
    }
}
