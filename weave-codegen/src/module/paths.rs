//! Output path resolution.

use crate::{Error, Result};

/// Normalise a module-relative path.
///
/// Empty and `.` segments are dropped. Absolute paths, `..` segments and
/// backslashes are rejected so nothing can escape the module root.
pub fn normalize(path: &str) -> Result<String> {
    if path.contains('\\') {
        return Err(Error::structural(format!(
            "path '{path}' must use '/' as separator"
        )));
    }
    if path.starts_with('/') {
        return Err(Error::structural(format!(
            "path '{path}' must be relative to the module root"
        )));
    }

    let mut segments = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                return Err(Error::structural(format!(
                    "path '{path}' must not leave the module root"
                )));
            }
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        return Err(Error::structural(format!("path '{path}' names no file")));
    }
    Ok(segments.join("/"))
}

/// Join a directory and a file name, then normalise.
pub fn join(dir: &str, file_name: &str) -> Result<String> {
    normalize(&format!("{dir}/{file_name}"))
}

/// Directory every file of a module lives under, e.g. `Vendor/Name`.
pub fn module_root(vendor: &str, name: &str) -> String {
    format!("{vendor}/{name}")
}

/// Path of a class file without extension.
///
/// `type_name` is fully qualified and lives inside `namespace`.
pub fn class_path(root: &str, namespace: &str, type_name: &str) -> String {
    let relative = type_name
        .strip_prefix(namespace)
        .and_then(|rest| rest.strip_prefix('\\'))
        .unwrap_or(type_name);
    format!("{root}/{}", relative.replace('\\', "/"))
}
