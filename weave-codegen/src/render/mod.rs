//! Renderers turning merged artifacts into file content.
//!
//! Renderers are pure: the same artifact always renders to the same bytes.

mod xml;

pub use xml::{XmlRenderer, escape_attribute, escape_text};
use weave_ir::ClassArtifact;

/// Renders classes in a target language.
pub trait ClassRenderer {
    /// Extension of class files, without the dot.
    fn file_extension(&self) -> &'static str;

    /// Render a fully merged class.
    fn render_class(&self, class: &ClassArtifact) -> String;
}
