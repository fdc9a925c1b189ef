//! Non-fatal findings recorded while a module is assembled.

use serde::Serialize;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// A fatal error that prevents further processing.
    Error,
    /// A warning that doesn't prevent processing but should be addressed.
    Warning,
    /// Informational message.
    Info,
}

impl Severity {
    /// Returns true if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns true if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A diagnostic message produced while merging artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The snippet invocation that produced this diagnostic, or `module`.
    pub origin: String,
    /// The diagnostic message.
    pub message: String,
    /// Optional merge target (e.g., "Vendor/Name/etc/example.xsd").
    pub location: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, origin, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, origin, message)
    }

    /// Create a new info diagnostic.
    pub fn info(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, origin, message)
    }

    fn new(severity: Severity, origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            origin: origin.into(),
            message: message.into(),
            location: None,
        }
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        write!(f, " [{}]", self.origin)
    }
}
