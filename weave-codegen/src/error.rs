use miette::Diagnostic;
use thiserror::Error;

/// Result type for snippet invocation and merging.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal failures of a generation run.
///
/// Every variant aborts the current snippet invocation; the module is left
/// exactly as it was before the invocation's failing registration.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("invalid value for '{param}': {message}")]
    #[diagnostic(code(weave::validation))]
    Validation { param: String, message: String },

    #[error("conflicting definitions of '{target}': {detail}")]
    #[diagnostic(
        code(weave::merge_conflict),
        help("two snippets produce incompatible content for the same target")
    )]
    MergeConflict { target: String, detail: String },

    #[error("invalid artifact: {reason}")]
    #[diagnostic(code(weave::structural))]
    Structural { reason: String },

    #[error("unknown snippet '{name}'")]
    #[diagnostic(code(weave::unknown_snippet), help("run 'weave list' to see available snippets"))]
    UnknownSnippet { name: String },
}

impl Error {
    pub fn validation(param: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            param: param.into(),
            message: message.into(),
        }
    }

    pub fn conflict(target: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::MergeConflict {
            target: target.into(),
            detail: detail.into(),
        }
    }

    pub fn structural(reason: impl Into<String>) -> Self {
        Error::Structural {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::validation("config_name", "Only lower case alphabet and underscore characters");
        assert_eq!(
            err.to_string(),
            "invalid value for 'config_name': Only lower case alphabet and underscore characters"
        );

        let err = Error::conflict("Vendor\\Name\\Model\\Foo", "method 'bar' has two different bodies");
        assert!(err.to_string().starts_with("conflicting definitions of 'Vendor\\Name\\Model\\Foo'"));
    }
}
