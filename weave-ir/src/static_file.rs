//! Static file artifacts.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Source of a static file's bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    /// Literal file content.
    Content(String),
    /// A template file on disk, read by the writer.
    Template(PathBuf),
}

/// A file copied to the output as-is.
///
/// Static files never merge; a later file with the same final path
/// replaces the earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticArtifact {
    pub file_name: String,
    pub payload: Payload,
}

impl StaticArtifact {
    pub fn content(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            payload: Payload::Content(content.into()),
        }
    }

    pub fn template(file_name: impl Into<String>, template: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            payload: Payload::Template(template.into()),
        }
    }
}
