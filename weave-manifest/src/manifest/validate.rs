//! Validation of names found in weave.toml

use miette::SourceSpan;

use crate::{Error, Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "weave.toml");
/// ctx.validate_module_name("Experius", "vendor")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// The raw TOML source content
    src: &'a str,
    /// The filename for error reporting
    filename: &'a str,
}

impl<'a> ParseContext<'a> {
    /// Create a new parse context with the given source and filename.
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self { src, filename }
    }

    /// Get the source content.
    pub fn src(&self) -> &'a str {
        self.src
    }

    /// Find the span of a quoted string value in the source.
    pub fn find_span(&self, value: &str) -> Option<SourceSpan> {
        find_value_span(self.src, value)
    }

    fn invalid(&self, name: &str, kind: &str, reason: &str) -> Box<Error> {
        SourceContext::new(self.src, self.filename).invalid_identifier_error(
            name,
            kind,
            reason,
            self.find_span(name),
        )
    }

    /// Vendor and module names must be PascalCase identifiers.
    pub fn validate_module_name(&self, name: &str, kind: &str) -> Result<()> {
        match validate_pascal_case(name) {
            Some(reason) => Err(self.invalid(name, kind, reason)),
            None => Ok(()),
        }
    }

    /// Snippet names are lower snake_case.
    pub fn validate_snippet_name(&self, name: &str) -> Result<()> {
        match validate_snake_case(name) {
            Some(reason) => Err(self.invalid(name, "snippet", reason)),
            None => Ok(()),
        }
    }

    /// Parameter names are lower snake_case.
    pub fn validate_param_name(&self, name: &str) -> Result<()> {
        match validate_snake_case(name) {
            Some(reason) => Err(self.invalid(name, "parameter", reason)),
            None => Ok(()),
        }
    }
}

/// Find `"value"` in the TOML source and return the span of the value
/// without its quotes. Falls back to a bare occurrence (e.g. table keys).
pub(crate) fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    if value.is_empty() {
        return None;
    }
    if let Some(pos) = src.find(&format!("\"{value}\"")) {
        return Some(SourceSpan::from((pos + 1, value.len())));
    }
    src.find(value)
        .map(|pos| SourceSpan::from((pos, value.len())))
}

/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_pascal_case(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    match chars.next() {
        None => Some("name cannot be empty"),
        Some(c) if !c.is_ascii_uppercase() => Some("name must start with an upper case letter"),
        _ if !chars.all(|c| c.is_ascii_alphanumeric()) => {
            Some("name may only contain letters and digits")
        }
        _ => None,
    }
}

/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_snake_case(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    match chars.next() {
        None => Some("name cannot be empty"),
        Some(c) if !c.is_ascii_lowercase() => Some("name must start with a lower case letter"),
        _ if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') => {
            Some("name may only contain lower case letters, digits and underscores")
        }
        _ => None,
    }
}
