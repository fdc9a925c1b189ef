use weave_ir::{ClassArtifact, StaticArtifact, TreeArtifact};

use crate::Diagnostic;

/// An artifact together with the output path it resolves to.
///
/// Paths are relative to the output directory and start with the module
/// root (`Vendor/Name/...`). Class paths carry no extension; the class
/// renderer supplies it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub path: String,
    pub artifact: T,
}

/// The final artifact set of a run, ready to be rendered.
#[derive(Debug, Clone)]
pub struct ModuleOutput {
    /// `Vendor_Name`
    pub module_name: String,
    pub classes: Vec<Resolved<ClassArtifact>>,
    pub trees: Vec<Resolved<TreeArtifact>>,
    pub statics: Vec<Resolved<StaticArtifact>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ModuleOutput {
    /// Look up a class by fully qualified name.
    pub fn class(&self, type_name: &str) -> Option<&ClassArtifact> {
        let type_name = type_name.trim_start_matches('\\');
        self.classes
            .iter()
            .map(|r| &r.artifact)
            .find(|c| c.type_name == type_name)
    }

    /// Look up a tree by its module-relative path.
    pub fn tree(&self, path: &str) -> Option<&TreeArtifact> {
        self.trees
            .iter()
            .map(|r| &r.artifact)
            .find(|t| t.path == path)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_warning())
    }

    /// Number of files this output renders to.
    pub fn file_count(&self) -> usize {
        self.classes.len() + self.trees.len() + self.statics.len()
    }
}
