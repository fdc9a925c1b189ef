//! Files every module needs regardless of its snippets.

use serde_json::json;
use weave_codegen::{Error, Result, module::Module};
use weave_core::to_kebab_case;
use weave_ir::{Node, StaticArtifact};

fn registration(module: &Module) -> String {
    format!(
        r#"<?php

declare(strict_types=1);

use Magento\Framework\Component\ComponentRegistrar;

ComponentRegistrar::register(ComponentRegistrar::MODULE, '{}', __DIR__);
"#,
        module.full_name()
    )
}

fn module_xml(module: &Module) -> Node {
    Node::new("config")
        .attr("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance")
        .attr(
            "xsi:noNamespaceSchemaLocation",
            "urn:magento:framework:Module/etc/module.xsd",
        )
        .child(Node::new("module").attr("name", module.full_name()))
}

fn composer_json(module: &Module, version: &str) -> Result<String> {
    let package = format!(
        "{}/module-{}",
        module.vendor().to_lowercase(),
        to_kebab_case(module.name())
    );
    let autoload_prefix = format!("{}\\", module.namespace());

    let mut content = serde_json::to_string_pretty(&json!({
        "name": package,
        "description": module.description().unwrap_or_default(),
        "type": "magento2-module",
        "version": version,
        "license": ["proprietary"],
        "autoload": {
            "files": ["registration.php"],
            "psr-4": { autoload_prefix: "" }
        }
    }))
    .map_err(|e| Error::structural(format!("failed to render composer.json: {e}")))?;
    content.push('\n');
    Ok(content)
}

/// Register `registration.php`, `etc/module.xml` and `composer.json`.
pub(crate) fn add_scaffold(module: &mut Module, version: &str) -> Result<()> {
    let registration = registration(module);
    let composer = composer_json(module, version)?;
    let module_xml = module_xml(module);

    module.add_static_file(".", StaticArtifact::content("registration.php", registration))?;
    module.add_static_file(".", StaticArtifact::content("composer.json", composer))?;
    module.add_xml("etc/module.xml", module_xml)
}
