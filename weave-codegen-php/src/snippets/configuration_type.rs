//! Custom XML configuration types.
//!
//! For every `config_name`/`node_name` pair this generates the XSD pair
//! plus the SchemaLocator, Converter and Reader classes Magento needs to
//! load `etc/{config_name}.xml` files from all modules.

use std::sync::LazyLock;

use regex::Regex;
use weave_codegen::{
    Error, Result,
    module::Module,
    snippet::{ParamDescriptor, ParamValues, Snippet},
};
use weave_core::to_pascal_case;
use weave_ir::{ClassArtifact, FieldSpec, MethodSpec, Node};

static LOWER_SNAKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_]+$").expect("valid regex"));

const LOWER_SNAKE_MESSAGE: &str = "Only lower case alphabet and underscore characters";

const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

pub struct ConfigurationType;

impl Snippet for ConfigurationType {
    fn name(&self) -> &'static str {
        "configuration_type"
    }

    fn label(&self) -> &'static str {
        "Configuration Type"
    }

    fn description(&self) -> &'static str {
        "Custom XML configuration file with schema, reader and converter"
    }

    fn params(&self) -> Vec<ParamDescriptor> {
        let lower = |name: &str, description: &str| {
            ParamDescriptor::new(name, description)
                .required()
                .pattern(LOWER_SNAKE.clone())
                .error_message(LOWER_SNAKE_MESSAGE)
        };
        vec![
            lower("config_name", "XML config filename").repeat(),
            lower("node_name", "Repeating XML node name").repeat(),
            lower("field_name", "Configuration field name"),
        ]
    }

    fn add(&self, module: &mut Module, values: &ParamValues) -> Result<()> {
        let configs = values.repeated("config_name");
        let nodes = values.repeated("node_name");
        let field = values.single("field_name")?;

        if configs.len() != nodes.len() {
            return Err(Error::validation(
                "node_name",
                format!(
                    "expected one node name per config name ({} config names, {} node names)",
                    configs.len(),
                    nodes.len()
                ),
            ));
        }

        for (config, node) in configs.iter().zip(nodes) {
            add_config_type(module, config, node, field)?;
        }
        Ok(())
    }
}

/// Namespace segment for a config name.
///
/// Names made only of underscores title-case to nothing; they become
/// `Config{n}` with `n` the name's length.
fn class_segment(config: &str) -> String {
    let segment = to_pascal_case(config);
    if segment.starts_with(|c: char| c.is_ascii_alphabetic()) {
        segment
    } else {
        format!("Config{}", config.len())
    }
}

fn add_config_type(module: &mut Module, config: &str, node: &str, field: &str) -> Result<()> {
    let namespace = format!("Config\\{}", class_segment(config));

    module.add_xml(&format!("etc/{config}.xsd"), schema(node, field))?;
    module.add_xml(
        &format!("etc/{config}_merged.xsd"),
        merged_schema(&module.full_name(), config),
    )?;

    let converter = module.qualify(&format!("{namespace}\\Converter"))?;
    let locator = module.qualify(&format!("{namespace}\\SchemaLocator"))?;

    module.add_class(schema_locator(&namespace, &module.full_name(), config))?;
    module.add_class(converter_class(&namespace, node))?;
    module.add_class(reader(&namespace, config, node, &converter, &locator))?;

    module.describe(format!(" - Configuration Type\n\t- {config}"));
    Ok(())
}

fn schema(node: &str, field: &str) -> Node {
    let node_type = format!("{node}Type");

    Node::new("xs:schema")
        .attr("attributeFormDefault", "unqualified")
        .attr("elementFormDefault", "qualified")
        .attr("xmlns:xs", XS_NAMESPACE)
        .child(
            Node::new("xs:element").attr("name", "config").child(
                Node::new("xs:complexType").child(
                    Node::new("xs:choice").attr("maxOccurs", "unbounded").child(
                        Node::new("xs:element")
                            .attr("name", node)
                            .attr("type", &node_type)
                            .attr("maxOccurs", "unbounded")
                            .attr("minOccurs", "0"),
                    ),
                ),
            ),
        )
        .child(
            Node::new("xs:complexType")
                .attr("name", &node_type)
                .child(
                    Node::new("xs:sequence").child(
                        Node::new("xs:element")
                            .attr("name", field)
                            .attr("type", "xs:string"),
                    ),
                )
                .child(
                    Node::new("xs:attribute")
                        .attr("name", "id")
                        .attr("type", "xs:string")
                        .attr("use", "required"),
                ),
        )
}

fn merged_schema(module_name: &str, config: &str) -> Node {
    Node::new("xs:schema").attr("xmlns:xs", XS_NAMESPACE).child(
        Node::new("xs:include").attr(
            "schemaLocation",
            format!("urn:magento:module:{module_name}:etc/{config}.xsd"),
        ),
    )
}

fn schema_locator(namespace: &str, module_name: &str, config: &str) -> ClassArtifact {
    ClassArtifact::new(format!("{namespace}\\SchemaLocator"))
        .implements("\\Magento\\Framework\\Config\\SchemaLocatorInterface")
        .dependency("Magento\\Framework\\Module\\Dir")
        .dependency("Magento\\Framework\\Module\\Dir\\Reader")
        .field(FieldSpec::new("schema").private().readonly().ty("?string"))
        .field(FieldSpec::new("perFileSchema").private().readonly().ty("?string"))
        .constructor(
            MethodSpec::new("__construct")
                .param("Reader $moduleReader")
                .body(format!(
                    "$etcDir = $moduleReader->getModuleDir(Dir::MODULE_ETC_DIR, '{module_name}');\n\
                     $this->schema = $etcDir . '/{config}_merged.xsd';\n\
                     $this->perFileSchema = $etcDir . '/{config}.xsd';"
                )),
        )
        .method(
            MethodSpec::new("getSchema")
                .returns("?string")
                .body("return $this->schema;"),
        )
        .method(
            MethodSpec::new("getPerFileSchema")
                .returns("?string")
                .body("return $this->perFileSchema;"),
        )
}

fn converter_class(namespace: &str, node: &str) -> ClassArtifact {
    let body = r#"
        $output = [];
        $xpath = new DOMXPath($source);
        $nodes = $xpath->evaluate('/config/{node}');

        /** @var DOMNode $node */
        foreach ($nodes as $node) {
            $nodeId = $node->attributes->getNamedItem('id')->nodeValue;

            $data = [];
            $data['id'] = $nodeId;
            foreach ($node->childNodes as $childNode) {
                if ($childNode->nodeType !== XML_ELEMENT_NODE) {
                    continue;
                }

                $data[$childNode->nodeName] = $childNode->nodeValue;
            }
            $output['{node}'][$nodeId] = $data;
        }

        return $output;
    "#
    .replace("{node}", node);

    ClassArtifact::new(format!("{namespace}\\Converter"))
        .implements("\\Magento\\Framework\\Config\\ConverterInterface")
        .dependency("DOMDocument")
        .dependency("DOMNode")
        .dependency("DOMXPath")
        .method(
            MethodSpec::new("convert")
                .param("DOMDocument $source")
                .returns("array")
                .doc([
                    "Convert dom node tree to array",
                    "",
                    "@param DOMDocument $source",
                    "@return array",
                ])
                .body(body),
        )
}

fn reader(namespace: &str, config: &str, node: &str, converter: &str, locator: &str) -> ClassArtifact {
    ClassArtifact::new(format!("{namespace}\\Reader"))
        .extends("\\Magento\\Framework\\Config\\Reader\\Filesystem")
        .dependency("Magento\\Framework\\Config\\FileResolverInterface")
        .dependency(converter)
        .dependency(locator)
        .dependency("Magento\\Framework\\Config\\ValidationStateInterface")
        .dependency("Magento\\Framework\\Config\\Dom")
        .field(
            FieldSpec::new("_idAttributes")
                .protected()
                .default_value(format!("[\n    '/config/{node}' => 'id',\n]")),
        )
        .constructor(
            MethodSpec::new("__construct")
                .params([
                    "FileResolverInterface $fileResolver".to_string(),
                    "Converter $converter".to_string(),
                    "SchemaLocator $schemaLocator".to_string(),
                    "ValidationStateInterface $validationState".to_string(),
                    format!("string $fileName = '{config}.xml'"),
                    "array $idAttributes = []".to_string(),
                    "string $domDocumentClass = Dom::class".to_string(),
                    "string $defaultScope = 'global'".to_string(),
                ])
                .body(
                    "
                    parent::__construct(
                        $fileResolver,
                        $converter,
                        $schemaLocator,
                        $validationState,
                        $fileName,
                        $idAttributes,
                        $domDocumentClass,
                        $defaultScope
                    );
                    ",
                ),
        )
}

#[cfg(test)]
mod tests {
    use weave_codegen::snippet::{RawParams, invoke};

    use super::*;

    fn raw(config: &[&str], node: &[&str], field: &str) -> RawParams {
        let owned = |vs: &[&str]| vs.iter().map(|v| v.to_string()).collect::<Vec<_>>();
        [
            ("config_name".to_string(), owned(config)),
            ("node_name".to_string(), owned(node)),
            ("field_name".to_string(), vec![field.to_string()]),
        ]
        .into_iter()
        .collect()
    }

    fn module() -> Module {
        Module::new("Experius", "Test").unwrap()
    }

    #[test]
    fn test_registers_all_artifacts() {
        let mut m = module();
        invoke(&mut m, &ConfigurationType, &raw(&["example"], &["example"], "name")).unwrap();

        assert!(m.tree("etc/example.xsd").is_some());
        assert!(m.tree("etc/example_merged.xsd").is_some());
        assert!(m.class("Config\\Example\\SchemaLocator").is_some());
        assert!(m.class("Config\\Example\\Converter").is_some());
        assert!(m.class("Config\\Example\\Reader").is_some());
        assert_eq!(m.notes(), [" - Configuration Type\n\t- example"]);
    }

    #[test]
    fn test_pascal_case_namespace() {
        let mut m = module();
        invoke(&mut m, &ConfigurationType, &raw(&["shipping_rates"], &["rate"], "price")).unwrap();
        assert!(m.class("Config\\ShippingRates\\Reader").is_some());
        assert!(m.tree("etc/shipping_rates.xsd").is_some());
    }

    #[test]
    fn test_class_segment() {
        assert_eq!(class_segment("shipping_rates"), "ShippingRates");
        assert_eq!(class_segment("_"), "Config1");
        assert_eq!(class_segment("__"), "Config2");
    }

    #[test]
    fn test_underscore_only_config_name() {
        let mut m = module();
        invoke(&mut m, &ConfigurationType, &raw(&["_"], &["example"], "id")).unwrap();
        invoke(&mut m, &ConfigurationType, &raw(&["__"], &["example"], "id")).unwrap();

        assert!(m.class("Config\\Config1\\Reader").is_some());
        assert!(m.class("Config\\Config2\\SchemaLocator").is_some());
        assert!(m.tree("etc/_.xsd").is_some());
        assert!(m.tree("etc/__merged.xsd").is_some());
        assert!(m.tree("etc/___merged.xsd").is_some());
        assert!(m.diagnostics().is_empty());
    }

    #[test]
    fn test_rejects_upper_case() {
        let mut m = module();
        let err = invoke(&mut m, &ConfigurationType, &raw(&["Example"], &["example"], "name"))
            .unwrap_err();
        match err {
            Error::Validation { param, message } => {
                assert_eq!(param, "config_name");
                assert_eq!(message, LOWER_SNAKE_MESSAGE);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(m.classes().is_empty());
    }

    #[test]
    fn test_repeated_names_are_paired() {
        let mut m = module();
        invoke(
            &mut m,
            &ConfigurationType,
            &raw(&["example", "carrier"], &["item", "method"], "name"),
        )
        .unwrap();

        let reader = m.class("Config\\Carrier\\Reader").unwrap();
        assert_eq!(
            reader.field_named("_idAttributes").unwrap().default.as_deref(),
            Some("[\n    '/config/method' => 'id',\n]")
        );
        assert_eq!(m.classes().len(), 6);
    }

    #[test]
    fn test_unpaired_names_fail() {
        let mut m = module();
        let err = invoke(&mut m, &ConfigurationType, &raw(&["example", "carrier"], &["item"], "name"))
            .unwrap_err();
        assert!(matches!(err, Error::Validation { ref param, .. } if param == "node_name"));
    }

    #[test]
    fn test_reader_imports_siblings_by_full_name() {
        let mut m = module();
        invoke(&mut m, &ConfigurationType, &raw(&["example"], &["example"], "name")).unwrap();

        let reader = m.class("Config\\Example\\Reader").unwrap();
        assert_eq!(
            reader.dependency_for("Converter").map(|d| d.type_name.as_str()),
            Some("Experius\\Test\\Config\\Example\\Converter")
        );
    }
}
