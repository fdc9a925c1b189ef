//! File registration for rendered module output.
//!
//! The registry collects one entry per artifact and writes them in
//! category order:
//!
//! ```ignore
//! let mut registry = FileRegistry::from_output(&output, &PhpRenderer, &XmlRenderer)?;
//! registry.keep_existing();
//! let stats = registry.write_all(&output_dir)?;
//! ```

use std::path::Path;

use eyre::{Result, WrapErr};
use weave_core::{File, FileRules, Overwrite, WriteResult};
use weave_ir::Payload;

use crate::{
    module::ModuleOutput,
    render::{ClassRenderer, XmlRenderer},
};

/// Category of generated file, determining generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileCategory {
    /// Rendered classes.
    Class,
    /// Rendered markup trees.
    Markup,
    /// Static files copied verbatim.
    Static,
    /// The module README.
    Docs,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Class => "class",
            FileCategory::Markup => "markup",
            FileCategory::Static => "static",
            FileCategory::Docs => "docs",
        }
    }
}

/// An entry in the file registry representing a file to be generated.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Relative path from output directory.
    pub path: String,
    /// File content.
    pub content: String,
    /// Category determining generation order.
    pub category: FileCategory,
    /// Overwrite behavior; defaults to [`Overwrite::Always`].
    pub overwrite: Overwrite,
}

impl FileEntry {
    pub fn new(
        path: impl Into<String>,
        content: impl Into<String>,
        category: FileCategory,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            category,
            overwrite: Overwrite::Always,
        }
    }

    /// Override the default overwrite behavior.
    pub fn with_overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }

    fn to_file(&self) -> File {
        File::new(&self.path, &self.content).with_rules(FileRules {
            overwrite: self.overwrite,
        })
    }

    /// Write this file below `base`.
    pub fn write(&self, base: &Path) -> Result<WriteResult> {
        self.to_file().write(base)
    }
}

/// Registry for collecting and managing generated files.
///
/// Files are generated in category order:
/// Class -> Markup -> Static -> Docs
#[derive(Debug, Default)]
pub struct FileRegistry {
    entries: Vec<FileEntry>,
}

impl FileRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render every artifact of `output` into an entry.
    ///
    /// Template payloads are read from disk here.
    pub fn from_output(
        output: &ModuleOutput,
        classes: &dyn ClassRenderer,
        markup: &XmlRenderer,
    ) -> Result<Self> {
        let mut registry = Self::new();

        for class in &output.classes {
            registry.register(FileEntry::new(
                format!("{}.{}", class.path, classes.file_extension()),
                classes.render_class(&class.artifact),
                FileCategory::Class,
            ));
        }

        for tree in &output.trees {
            registry.register(FileEntry::new(
                &tree.path,
                markup.render_tree(&tree.artifact),
                FileCategory::Markup,
            ));
        }

        for file in &output.statics {
            let content = match &file.artifact.payload {
                Payload::Content(content) => content.clone(),
                Payload::Template(template) => std::fs::read_to_string(template)
                    .wrap_err_with(|| format!("failed to read template '{}'", template.display()))?,
            };
            let category = if file.artifact.file_name == "README.md" {
                FileCategory::Docs
            } else {
                FileCategory::Static
            };
            registry.register(FileEntry::new(&file.path, content, category));
        }

        Ok(registry)
    }

    /// Register a file entry.
    pub fn register(&mut self, entry: FileEntry) {
        self.entries.push(entry);
    }

    /// Only create files that do not exist yet.
    pub fn keep_existing(&mut self) {
        for entry in &mut self.entries {
            entry.overwrite = Overwrite::IfMissing;
        }
    }

    /// Get all registered entries, sorted by category.
    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.category);
        sorted.into_iter()
    }

    /// Look up an entry by path.
    pub fn get(&self, path: &str) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    /// Get the number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Preview all files (returns path and content pairs).
    pub fn preview(&self) -> Vec<PreviewEntry> {
        self.entries()
            .map(|e| PreviewEntry {
                path: e.path.clone(),
                content: e.content.clone(),
                category: e.category,
            })
            .collect()
    }

    /// Write all files to the output directory.
    ///
    /// Files are written in category order. Returns statistics about what was written.
    pub fn write_all(&self, base: &Path) -> Result<WriteStats> {
        let mut stats = WriteStats::default();

        for entry in self.entries() {
            match entry.write(base)? {
                WriteResult::Written => {
                    tracing::debug!(path = %entry.path, "wrote file");
                    stats.written += 1;
                    stats.written_paths.push(entry.path.clone());
                }
                WriteResult::Skipped => {
                    tracing::debug!(path = %entry.path, "kept existing file");
                    stats.skipped += 1;
                    stats.skipped_paths.push(entry.path.clone());
                }
            }
        }

        Ok(stats)
    }
}

/// A preview entry for displaying what would be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEntry {
    /// Relative path from output directory.
    pub path: String,
    /// File content.
    pub content: String,
    /// File category.
    pub category: FileCategory,
}

/// Statistics from a write operation.
#[derive(Debug, Default)]
pub struct WriteStats {
    /// Number of files written.
    pub written: usize,
    /// Number of files skipped (already existed).
    pub skipped: usize,
    /// Paths of written files.
    pub written_paths: Vec<String>,
    /// Paths of skipped files.
    pub skipped_paths: Vec<String>,
}

impl WriteStats {
    /// Total number of files processed.
    pub fn total(&self) -> usize {
        self.written + self.skipped
    }
}
