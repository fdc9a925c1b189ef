use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory '{}'", parent.display()))?;
    }
    std::fs::write(path, content)
        .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was skipped (already exists)
    Skipped,
}

/// A rendered output file, addressed relative to an output directory.
#[derive(Debug, Clone)]
pub struct File {
    path: PathBuf,
    content: String,
    rules: FileRules,
}

impl File {
    /// Create a new file with the given relative path and content (always overwritten).
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            rules: FileRules::default(),
        }
    }

    /// Replace the write rules.
    pub fn with_rules(mut self, rules: FileRules) -> Self {
        self.rules = rules;
        self
    }

    /// Get the relative file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the write rules
    pub fn rules(&self) -> &FileRules {
        &self.rules
    }

    /// Absolute location of this file below `base`.
    pub fn target(&self, base: &Path) -> PathBuf {
        base.join(&self.path)
    }

    /// Write the file below `base` according to its rules
    pub fn write(&self, base: &Path) -> Result<WriteResult> {
        let target = self.target(base);
        match self.rules.overwrite {
            Overwrite::Always => {
                write_file(&target, &self.content)?;
                Ok(WriteResult::Written)
            }
            Overwrite::IfMissing => {
                if target.exists() {
                    Ok(WriteResult::Skipped)
                } else {
                    write_file(&target, &self.content)?;
                    Ok(WriteResult::Written)
                }
            }
        }
    }
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone, Default)]
pub struct FileRules {
    pub overwrite: Overwrite,
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite
    #[default]
    Always,
    /// Only create if the file doesn't exist yet
    IfMissing,
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Vendor").join("Module").join("etc").join("a.xsd");

        write_file(&path, "nested").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_file_write_always_overwrites() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("registration.php"), "original").unwrap();

        let file = File::new("registration.php", "updated");
        let result = file.write(temp.path()).unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(
            fs::read_to_string(temp.path().join("registration.php")).unwrap(),
            "updated"
        );
    }

    #[test]
    fn test_file_write_if_missing_creates_new() {
        let temp = TempDir::new().unwrap();

        let file = File::new("etc/module.xml", "<config/>").with_rules(FileRules {
            overwrite: Overwrite::IfMissing,
        });
        let result = file.write(temp.path()).unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(
            fs::read_to_string(temp.path().join("etc/module.xml")).unwrap(),
            "<config/>"
        );
    }

    #[test]
    fn test_file_write_if_missing_skips_existing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), "hand written").unwrap();

        let file = File::new("README.md", "generated").with_rules(FileRules {
            overwrite: Overwrite::IfMissing,
        });
        let result = file.write(temp.path()).unwrap();

        assert_eq!(result, WriteResult::Skipped);
        assert_eq!(
            fs::read_to_string(temp.path().join("README.md")).unwrap(),
            "hand written"
        );
    }

    #[test]
    fn test_target_joins_base() {
        let file = File::new("Vendor/Module/etc/a.xsd", "");
        assert_eq!(
            file.target(Path::new("/out")),
            PathBuf::from("/out/Vendor/Module/etc/a.xsd")
        );
    }
}
