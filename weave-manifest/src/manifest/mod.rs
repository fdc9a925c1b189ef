//! Manifest types and parsing for weave.toml files.

mod edit;
mod file;
mod parse;
mod validate;

use indexmap::IndexMap;
use serde::Deserialize;

pub use edit::{append_section, module_section, snippet_section};
pub use file::WeaveToml;
pub use validate::ParseContext;

/// Root manifest for weave.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Module metadata
    pub module: ModuleConfig,

    /// Snippet invocations, run in order
    #[serde(default)]
    pub snippets: Vec<SnippetInvocation>,
}

/// The `[module]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleConfig {
    /// Vendor part of the module name (e.g. `Experius`)
    pub vendor: String,

    /// Module part of the module name (e.g. `Test`)
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,

    pub description: Option<String>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// One `[[snippets]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnippetInvocation {
    /// Snippet name
    #[serde(rename = "use")]
    pub snippet: String,

    #[serde(default)]
    pub params: IndexMap<String, ParamInput>,
}

impl SnippetInvocation {
    /// Parameters as ordered value lists.
    pub fn raw_params(&self) -> IndexMap<String, Vec<String>> {
        self.params
            .iter()
            .map(|(k, v)| (k.clone(), v.values()))
            .collect()
    }
}

/// A parameter value: a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ParamInput {
    One(String),
    Many(Vec<String>),
}

impl ParamInput {
    pub fn values(&self) -> Vec<String> {
        match self {
            ParamInput::One(v) => vec![v.clone()],
            ParamInput::Many(vs) => vs.clone(),
        }
    }
}

impl Manifest {
    /// `Vendor_Name`
    pub fn module_name(&self) -> String {
        format!("{}_{}", self.module.vendor, self.module.name)
    }
}
