//! The module: exclusive owner of a run's artifacts.
//!
//! Snippets register classes, markup trees and static files here. A
//! contribution aimed at an identity that already exists is merged into
//! it; fatal conflicts leave the module untouched and non-fatal ones are
//! recorded as warnings.

mod class_merge;
mod output;
pub mod paths;
mod tree_merge;

use indexmap::IndexMap;
pub use output::{ModuleOutput, Resolved};
use weave_ir::{ClassArtifact, Node, StaticArtifact, TreeArtifact, absolute_name};

use crate::{Diagnostic, Error, Result};

/// Result of a successful merge.
#[derive(Debug)]
pub(crate) struct Merged<T> {
    pub value: T,
    pub warnings: Vec<String>,
}

/// A generated module named `Vendor_Name`.
#[derive(Debug, Clone)]
pub struct Module {
    vendor: String,
    name: String,
    description: Option<String>,
    /// Keyed by fully qualified type name.
    classes: IndexMap<String, ClassArtifact>,
    /// Keyed by module-relative path.
    trees: IndexMap<String, TreeArtifact>,
    /// Keyed by module-relative path.
    statics: IndexMap<String, StaticArtifact>,
    notes: Vec<String>,
    diagnostics: Vec<Diagnostic>,
    origin: Option<String>,
}

fn is_pascal_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase()) && chars.all(|c| c.is_ascii_alphanumeric())
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Module {
    /// Create an empty module.
    ///
    /// Both parts of the name must be PascalCase identifiers.
    pub fn new(vendor: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let vendor = vendor.into();
        let name = name.into();
        for (part, value) in [("vendor", &vendor), ("module", &name)] {
            if !is_pascal_identifier(value) {
                return Err(Error::structural(format!(
                    "{part} name '{value}' must start with an upper case letter and contain only letters and digits"
                )));
            }
        }

        Ok(Self {
            vendor,
            name,
            description: None,
            classes: IndexMap::new(),
            trees: IndexMap::new(),
            statics: IndexMap::new(),
            notes: Vec::new(),
            diagnostics: Vec::new(),
            origin: None,
        })
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `Vendor_Name`, as used in module registration.
    pub fn full_name(&self) -> String {
        format!("{}_{}", self.vendor, self.name)
    }

    /// `Vendor\Name`
    pub fn namespace(&self) -> String {
        format!("{}\\{}", self.vendor, self.name)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Fully qualify a class name.
    ///
    /// Names without a leading `\` are relative to the module namespace.
    /// Absolute names must still point inside it.
    pub fn qualify(&self, type_name: &str) -> Result<String> {
        let namespace = self.namespace();
        let qualified = match type_name.strip_prefix('\\') {
            Some(absolute) => {
                if !absolute.starts_with(&format!("{namespace}\\")) {
                    return Err(Error::structural(format!(
                        "class '{type_name}' lies outside the module namespace '{namespace}'"
                    )));
                }
                absolute.to_string()
            }
            None => format!("{namespace}\\{type_name}"),
        };

        if !qualified.split('\\').all(is_identifier) {
            return Err(Error::structural(format!(
                "'{type_name}' is not a valid class name"
            )));
        }
        Ok(qualified)
    }

    /// Register a class, merging it with an earlier one of the same name.
    pub fn add_class(&mut self, class: ClassArtifact) -> Result<()> {
        class_merge::validate(&class)?;
        let mut class = class;
        let key = self.qualify(&class.type_name)?;
        class.type_name = key.clone();
        class.capabilities = class.capabilities.iter().map(|c| absolute_name(c)).collect();

        match self.classes.get(&key) {
            None => {
                tracing::debug!(class = %key, "registered class");
                self.classes.insert(key, class);
            }
            Some(existing) => {
                let merged = class_merge::merge(existing, class)?;
                tracing::debug!(class = %key, "merged class");
                self.record(&key, merged.warnings);
                self.classes.insert(key, merged.value);
            }
        }
        Ok(())
    }

    /// Register a markup document at `path`, merging it with an earlier
    /// document at the same path.
    pub fn add_xml(&mut self, path: &str, root: Node) -> Result<()> {
        tree_merge::validate(&root)?;
        let path = paths::normalize(path)?;

        match self.trees.get(&path) {
            None => {
                tracing::debug!(%path, "registered tree");
                self.trees.insert(path.clone(), TreeArtifact::new(path, root));
            }
            Some(existing) => {
                let merged = tree_merge::merge(&path, &existing.root, root)?;
                tracing::debug!(%path, "merged tree");
                self.record(&path, merged.warnings);
                self.trees
                    .insert(path.clone(), TreeArtifact::new(path, merged.value));
            }
        }
        Ok(())
    }

    /// Register a static file inside `output_dir` (module-relative).
    ///
    /// A later file at the same path replaces the earlier one.
    pub fn add_static_file(&mut self, output_dir: &str, file: StaticArtifact) -> Result<()> {
        let path = paths::join(output_dir, &file.file_name)?;
        if self.statics.get(&path).is_some_and(|existing| *existing != file) {
            self.record(&path, vec!["static file replaced by a later one".to_string()]);
        }
        tracing::debug!(%path, "registered static file");
        self.statics.insert(path, file);
        Ok(())
    }

    /// Append a section to the module README. Repeated text is kept once.
    pub fn describe(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !self.notes.contains(&text) {
            self.notes.push(text);
        }
    }

    pub fn classes(&self) -> &IndexMap<String, ClassArtifact> {
        &self.classes
    }

    /// Look up a class by (possibly relative) name.
    pub fn class(&self, type_name: &str) -> Option<&ClassArtifact> {
        self.qualify(type_name)
            .ok()
            .and_then(|key| self.classes.get(&key))
    }

    pub fn trees(&self) -> &IndexMap<String, TreeArtifact> {
        &self.trees
    }

    pub fn tree(&self, path: &str) -> Option<&TreeArtifact> {
        paths::normalize(path)
            .ok()
            .and_then(|key| self.trees.get(&key))
    }

    pub fn statics(&self) -> &IndexMap<String, StaticArtifact> {
        &self.statics
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Attribute subsequent diagnostics to `origin`.
    pub fn set_origin(&mut self, origin: impl Into<String>) {
        self.origin = Some(origin.into());
    }

    pub fn reset_origin(&mut self) {
        self.origin = None;
    }

    fn record(&mut self, location: &str, warnings: Vec<String>) {
        let origin = self.origin.as_deref().unwrap_or("module");
        for message in warnings {
            tracing::warn!(origin, location, "{message}");
            self.diagnostics
                .push(Diagnostic::warning(origin, message).at(location));
        }
    }

    /// The README summarising the module, if anything was described.
    fn readme(&self) -> Option<StaticArtifact> {
        if self.notes.is_empty() {
            return None;
        }
        let mut content = format!("# {}\n\n", self.full_name());
        if let Some(description) = &self.description {
            content.push_str(description.trim());
            content.push_str("\n\n");
        }
        content.push_str("## Specifications\n\n");
        for note in &self.notes {
            content.push_str(note);
            content.push('\n');
        }
        Some(StaticArtifact::content("README.md", content))
    }

    /// Resolve every artifact to its output path.
    pub fn finish(mut self) -> ModuleOutput {
        if let Some(readme) = self.readme() {
            let key = "README.md".to_string();
            if self.statics.get(&key).is_some_and(|existing| *existing != readme) {
                self.record(&key, vec!["static file replaced by the generated README".to_string()]);
            }
            self.statics.insert(key, readme);
        }

        let root = paths::module_root(&self.vendor, &self.name);
        let namespace = self.namespace();

        let classes = self
            .classes
            .into_values()
            .map(|class| Resolved {
                path: paths::class_path(&root, &namespace, &class.type_name),
                artifact: class,
            })
            .collect();
        let trees = self
            .trees
            .into_iter()
            .map(|(path, tree)| Resolved {
                path: format!("{root}/{path}"),
                artifact: tree,
            })
            .collect();
        let statics = self
            .statics
            .into_iter()
            .map(|(path, file)| Resolved {
                path: format!("{root}/{path}"),
                artifact: file,
            })
            .collect();

        ModuleOutput {
            module_name: format!("{}_{}", self.vendor, self.name),
            classes,
            trees,
            statics,
            diagnostics: self.diagnostics,
        }
    }
}
