use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::{Manifest, append_section, snippet_section};
use crate::{Error, Result};

/// Represents a weave.toml file with both raw content and parsed manifest.
#[derive(Debug)]
pub struct WeaveToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl WeaveToml {
    /// Open and parse a weave.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Update content and re-parse the manifest.
    ///
    /// On a parse error the previous content is kept.
    pub fn set_content(&mut self, content: String) -> Result<()> {
        let filename = self.path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;
        self.content = content;
        self.manifest = manifest;
        Ok(())
    }

    /// Append a `[[snippets]]` entry.
    pub fn append_snippet(
        &mut self,
        snippet: &str,
        params: &IndexMap<String, Vec<String>>,
    ) -> Result<()> {
        let content = append_section(&self.content, &snippet_section(snippet, params));
        self.set_content(content)
    }

    /// Save the current content to disk.
    pub fn save(&self) -> Result<()> {
        std::fs::write(&self.path, &self.content).map_err(|e| {
            Box::new(Error::Write {
                path: self.path.clone(),
                source: e,
            })
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_append_snippet_and_save() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("weave.toml");
        std::fs::write(&path, "# my module\n[module]\nvendor = \"Experius\"\nname = \"Test\"\n").unwrap();

        let mut file = WeaveToml::open(&path).unwrap();
        let mut params = IndexMap::new();
        params.insert("config_name".to_string(), vec!["example".to_string()]);
        params.insert("node_name".to_string(), vec!["example".to_string()]);
        params.insert("field_name".to_string(), vec!["id".to_string()]);
        file.append_snippet("configuration_type", &params).unwrap();
        file.save().unwrap();

        let reopened = WeaveToml::open(&path).unwrap();
        assert!(reopened.content().starts_with("# my module\n"));
        assert_eq!(reopened.manifest().snippets.len(), 1);
        assert_eq!(reopened.manifest().snippets[0].snippet, "configuration_type");
    }

    #[test]
    fn test_set_content_rejects_invalid() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("weave.toml");
        let original = "[module]\nvendor = \"Experius\"\nname = \"Test\"\n";
        std::fs::write(&path, original).unwrap();

        let mut file = WeaveToml::open(&path).unwrap();
        assert!(file.set_content("[module]\nvendor = 1\n".to_string()).is_err());
        assert_eq!(file.content(), original);
    }
}
