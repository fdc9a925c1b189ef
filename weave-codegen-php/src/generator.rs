use eyre::{Result, WrapErr};
use weave_codegen::{
    generation::FileRegistry,
    language::{Generated, LanguageCodegen},
    module::{Module, ModuleOutput},
    render::XmlRenderer,
    snippet::{SnippetRegistry, invoke},
};
use weave_manifest::Manifest;

use crate::{PhpRenderer, scaffold::add_scaffold, snippets};

/// PHP generator that turns a manifest into a Magento 2 module.
pub struct Generator<'a> {
    manifest: &'a Manifest,
    snippets: SnippetRegistry,
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "php"
    }

    fn build(&self) -> Result<Generated> {
        let output = self.assemble()?;
        let files = FileRegistry::from_output(&output, &PhpRenderer, &XmlRenderer::new())?;
        Ok(Generated {
            module_name: output.module_name,
            files,
            diagnostics: output.diagnostics,
        })
    }
}

impl<'a> Generator<'a> {
    /// Generator using the built-in snippets.
    pub fn new(manifest: &'a Manifest) -> Self {
        Self::with_snippets(manifest, snippets::builtin())
    }

    pub fn with_snippets(manifest: &'a Manifest, snippets: SnippetRegistry) -> Self {
        Self { manifest, snippets }
    }

    pub fn snippets(&self) -> &SnippetRegistry {
        &self.snippets
    }

    /// Run every snippet invocation in manifest order, then add the
    /// files every module needs.
    pub fn assemble(&self) -> Result<ModuleOutput> {
        let config = &self.manifest.module;
        let mut module = Module::new(&config.vendor, &config.name)?;
        if let Some(description) = &config.description {
            module.set_description(description);
        }

        for (index, invocation) in self.manifest.snippets.iter().enumerate() {
            let snippet = self.snippets.get(&invocation.snippet)?;
            tracing::info!(snippet = snippet.name(), index, "applying snippet");
            invoke(&mut module, snippet, &invocation.raw_params()).wrap_err_with(|| {
                format!("snippet #{} ('{}') failed", index + 1, invocation.snippet)
            })?;
        }

        add_scaffold(&mut module, &config.version)?;
        Ok(module.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[module]
vendor = "Experius"
name = "ConfigTypes"
description = "Custom configuration files"

[[snippets]]
use = "configuration_type"
params = { config_name = "example", node_name = "example", field_name = "name" }
"#;

    #[test]
    fn test_build_registers_files() {
        let manifest: Manifest = MANIFEST.parse().unwrap();
        let generated = Generator::new(&manifest).build().unwrap();

        assert_eq!(generated.module_name, "Experius_ConfigTypes");
        assert!(generated.diagnostics.is_empty());
        for path in [
            "Experius/ConfigTypes/registration.php",
            "Experius/ConfigTypes/composer.json",
            "Experius/ConfigTypes/README.md",
            "Experius/ConfigTypes/etc/module.xml",
            "Experius/ConfigTypes/etc/example.xsd",
            "Experius/ConfigTypes/etc/example_merged.xsd",
            "Experius/ConfigTypes/Config/Example/Reader.php",
            "Experius/ConfigTypes/Config/Example/Converter.php",
            "Experius/ConfigTypes/Config/Example/SchemaLocator.php",
        ] {
            assert!(generated.files.get(path).is_some(), "missing {path}");
        }
        assert_eq!(generated.files.len(), 9);
    }

    #[test]
    fn test_unknown_snippet() {
        let manifest: Manifest = r#"
[module]
vendor = "Experius"
name = "ConfigTypes"

[[snippets]]
use = "no_such_snippet"
"#
        .parse()
        .unwrap();

        let err = Generator::new(&manifest).assemble().unwrap_err();
        assert!(err.to_string().contains("unknown snippet 'no_such_snippet'"));
    }
}
