//! The snippet contract.
//!
//! A snippet is a named generator unit with a fixed parameter schema. It
//! receives validated values and contributes artifacts to a [`Module`];
//! it performs no I/O of its own.

mod params;
mod registry;

pub use params::{ParamDescriptor, ParamValue, ParamValues, RawParams, Validator, validate_params};
pub use registry::SnippetRegistry;

use crate::{Result, module::Module};

/// A generator unit contributing artifacts to a module.
pub trait Snippet {
    /// Identifier used in manifests (e.g. `configuration_type`).
    fn name(&self) -> &'static str;

    /// Human readable label.
    fn label(&self) -> &'static str;

    fn description(&self) -> &'static str {
        ""
    }

    /// The accepted parameters, in prompt order.
    fn params(&self) -> Vec<ParamDescriptor>;

    /// Register this snippet's artifacts with `module`.
    fn add(&self, module: &mut Module, values: &ParamValues) -> Result<()>;
}

/// Validate `raw` against the snippet's parameters and run it.
///
/// Diagnostics recorded while the snippet runs are attributed to it.
pub fn invoke(module: &mut Module, snippet: &dyn Snippet, raw: &RawParams) -> Result<()> {
    let values = validate_params(&snippet.params(), raw)?;
    tracing::debug!(snippet = snippet.name(), "invoking snippet");

    module.set_origin(snippet.name());
    let result = snippet.add(module, &values);
    module.reset_origin();
    result
}
