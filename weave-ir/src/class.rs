//! Class artifacts.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Member visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// Keyword used in generated source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

/// Last `\`-separated segment of a type name.
///
/// ```
/// use weave_ir::short_name;
///
/// assert_eq!(short_name("Magento\\Framework\\Module\\Dir\\Reader"), "Reader");
/// assert_eq!(short_name("Converter"), "Converter");
/// ```
pub fn short_name(type_name: &str) -> &str {
    type_name.rsplit('\\').next().unwrap_or(type_name)
}

/// A type name with exactly one leading `\`.
///
/// ```
/// use weave_ir::absolute_name;
///
/// assert_eq!(absolute_name("Countable"), "\\Countable");
/// assert_eq!(absolute_name("\\\\Countable"), "\\Countable");
/// ```
pub fn absolute_name(type_name: &str) -> String {
    format!("\\{}", type_name.trim_start_matches('\\'))
}

/// A property declared on a class.
///
/// Fields are compared by name when contributions are merged, so two
/// snippets declaring the same property do not produce duplicate output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub visibility: Visibility,
    /// Declared type (e.g. `?string`, `array`).
    pub ty: Option<String>,
    /// Initializer expression, possibly spanning several lines.
    pub default: Option<String>,
    pub readonly: bool,
    pub is_static: bool,
}

impl FieldSpec {
    /// Create a new public, untyped field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            ty: None,
            default: None,
            readonly: false,
            is_static: false,
        }
    }

    pub fn visibility(mut self, vis: Visibility) -> Self {
        self.visibility = vis;
        self
    }

    pub fn private(self) -> Self {
        self.visibility(Visibility::Private)
    }

    pub fn protected(self) -> Self {
        self.visibility(Visibility::Protected)
    }

    pub fn ty(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// A method (or constructor) on a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSpec {
    pub name: String,
    pub visibility: Visibility,
    /// Raw parameter declarations, in order.
    pub params: Vec<String>,
    pub return_type: Option<String>,
    /// Doc block lines, without comment markers.
    pub doc: Option<Vec<String>>,
    /// Method body. Normalised on assignment, see [`MethodSpec::body`].
    pub body: String,
}

impl MethodSpec {
    /// Create a new public method with an empty body.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            params: Vec::new(),
            return_type: None,
            doc: None,
            body: String::new(),
        }
    }

    pub fn visibility(mut self, vis: Visibility) -> Self {
        self.visibility = vis;
        self
    }

    pub fn param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.params.extend(params.into_iter().map(Into::into));
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn doc(mut self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.doc = Some(lines.into_iter().map(Into::into).collect());
        self
    }

    /// Set the body.
    ///
    /// Leading and trailing blank lines are dropped, trailing whitespace is
    /// stripped from every line and the common indentation is removed, so
    /// bodies written as indented string literals compare equal to their
    /// flush-left form.
    pub fn body(mut self, body: impl AsRef<str>) -> Self {
        self.body = normalize_body(body.as_ref());
        self
    }

    /// Check whether everything except the body matches `other`.
    pub fn same_signature(&self, other: &MethodSpec) -> bool {
        self.name == other.name
            && self.visibility == other.visibility
            && self.params == other.params
            && self.return_type == other.return_type
            && self.doc == other.doc
    }
}

fn normalize_body(body: &str) -> String {
    let lines: Vec<&str> = body.lines().map(str::trim_end).collect();
    let start = lines.iter().position(|l| !l.is_empty());
    let end = lines.iter().rposition(|l| !l.is_empty());
    let (Some(start), Some(end)) = (start, end) else {
        return String::new();
    };
    let lines = &lines[start..=end];

    let indent = lines
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|l| if l.is_empty() { "" } else { &l[indent..] })
        .collect::<Vec<_>>()
        .join("\n")
}

/// An imported type, referenced by `alias` inside the class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub alias: String,
    pub type_name: String,
}

impl Dependency {
    /// Import `type_name` under its short name.
    pub fn new(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        let type_name = type_name.trim_start_matches('\\').to_string();
        Self {
            alias: short_name(&type_name).to_string(),
            type_name,
        }
    }

    /// Import `type_name` under an explicit alias.
    pub fn aliased(alias: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            type_name: type_name.into().trim_start_matches('\\').to_string(),
        }
    }

    /// Whether the alias differs from the imported type's short name.
    pub fn is_renamed(&self) -> bool {
        self.alias != short_name(&self.type_name)
    }
}

/// A class contributed by a snippet.
///
/// `type_name` is the identity of the class inside a module: a second
/// contribution with the same name is merged into the first. Names without
/// a leading `\` are relative to the owning module's namespace.
///
/// Methods and dependencies are kept in declaration order; a name (or
/// alias) must appear at most once per contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassArtifact {
    pub type_name: String,
    pub parent: Option<String>,
    /// Implemented interfaces.
    pub capabilities: IndexSet<String>,
    pub fields: Vec<FieldSpec>,
    pub constructor: Option<MethodSpec>,
    pub methods: Vec<MethodSpec>,
    pub dependencies: Vec<Dependency>,
}

impl ClassArtifact {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            parent: None,
            capabilities: IndexSet::new(),
            fields: Vec::new(),
            constructor: None,
            methods: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Capabilities are stored fully qualified, so `Countable` and
    /// `\Countable` name the same interface.
    pub fn implements(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.insert(absolute_name(&capability.into()));
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn constructor(mut self, constructor: MethodSpec) -> Self {
        self.constructor = Some(constructor);
        self
    }

    pub fn method(mut self, method: MethodSpec) -> Self {
        self.methods.push(method);
        self
    }

    /// Import a type under its short name.
    pub fn dependency(mut self, type_name: impl Into<String>) -> Self {
        self.dependencies.push(Dependency::new(type_name));
        self
    }

    pub fn dependencies(mut self, type_names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.dependencies
            .extend(type_names.into_iter().map(Dependency::new));
        self
    }

    /// Import a type under an explicit alias.
    pub fn dependency_as(mut self, alias: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.dependencies.push(Dependency::aliased(alias, type_name));
        self
    }

    /// The unqualified class name.
    pub fn short_name(&self) -> &str {
        short_name(&self.type_name)
    }

    /// Namespace part of the type name, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.type_name
            .trim_start_matches('\\')
            .rsplit_once('\\')
            .map(|(ns, _)| ns)
    }

    pub fn method_named(&self, name: &str) -> Option<&MethodSpec> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn field_named(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn dependency_for(&self, alias: &str) -> Option<&Dependency> {
        self.dependencies.iter().find(|d| d.alias == alias)
    }

    /// Method names in declaration order.
    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(|m| m.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_normalization() {
        let m = MethodSpec::new("getSchema").body("\n    return $this->schema;\n\t\t");
        assert_eq!(m.body, "return $this->schema;");
    }

    #[test]
    fn test_body_keeps_relative_indentation() {
        let m = MethodSpec::new("convert").body(
            "
            foreach ($nodes as $node) {
                $data = [];
            }

            return $output;
            ",
        );
        assert_eq!(
            m.body,
            "foreach ($nodes as $node) {\n    $data = [];\n}\n\nreturn $output;"
        );
    }

    #[test]
    fn test_blank_body() {
        assert_eq!(MethodSpec::new("noop").body("\n  \n").body, "");
    }

    #[test]
    fn test_same_signature_ignores_body() {
        let a = MethodSpec::new("getSchema").returns("?string").body("return 1;");
        let b = MethodSpec::new("getSchema").returns("?string").body("return 2;");
        let c = MethodSpec::new("getSchema").returns("string").body("return 1;");
        assert!(a.same_signature(&b));
        assert!(!a.same_signature(&c));
    }

    #[test]
    fn test_dependency_alias() {
        let d = Dependency::new("\\Magento\\Framework\\Config\\Dom");
        assert_eq!(d.alias, "Dom");
        assert_eq!(d.type_name, "Magento\\Framework\\Config\\Dom");
        assert!(!d.is_renamed());

        let d = Dependency::aliased("ModuleDir", "Magento\\Framework\\Module\\Dir");
        assert!(d.is_renamed());
    }

    #[test]
    fn test_class_builder() {
        let class = ClassArtifact::new("Config\\Example\\Reader")
            .extends("\\Magento\\Framework\\Config\\Reader\\Filesystem")
            .implements("\\Countable")
            .implements("\\Countable")
            .dependency("Magento\\Framework\\Config\\Dom")
            .field(FieldSpec::new("_idAttributes").protected().ty("array"))
            .method(MethodSpec::new("count").returns("int"));

        assert_eq!(class.short_name(), "Reader");
        assert_eq!(class.namespace(), Some("Config\\Example"));
        assert_eq!(class.capabilities.len(), 1);
        assert!(class.dependency_for("Dom").is_some());
        assert!(class.field_named("_idAttributes").is_some());
        assert_eq!(class.method_names(), vec!["count"]);
    }

    #[test]
    fn test_capabilities_dedupe_on_leading_backslash() {
        let class = ClassArtifact::new("Model\\Item")
            .implements("\\Countable")
            .implements("Countable")
            .implements("JsonSerializable");

        let capabilities: Vec<&str> = class.capabilities.iter().map(String::as_str).collect();
        assert_eq!(capabilities, vec!["\\Countable", "\\JsonSerializable"]);
    }

    #[test]
    fn test_namespace_of_unqualified_class() {
        assert_eq!(ClassArtifact::new("Helper").namespace(), None);
    }
}
