//! Artifact types for the weave module generator.
//!
//! Snippets build these values and hand them to a module, which becomes
//! their sole owner and merges contributions that target the same identity.
//!
//! # Architecture
//!
//! ```text
//! parameters → snippet → artifacts (weave-ir) → module merge → renderers → files
//! ```
//!
//! There are three artifact kinds:
//! - [`ClassArtifact`] - a named type with fields, methods and dependencies
//! - [`TreeArtifact`] - a markup document rooted at a [`Node`]
//! - [`StaticArtifact`] - an opaque file copied to the output verbatim
//!
//! The types carry no rendering or merge logic; that lives in
//! `weave-codegen`.

mod class;
mod static_file;
mod tree;

pub use class::{ClassArtifact, Dependency, FieldSpec, MethodSpec, Visibility, absolute_name, short_name};
pub use static_file::{Payload, StaticArtifact};
pub use tree::{Content, Node, TreeArtifact};
