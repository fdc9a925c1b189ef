//! PHP class rendering.

use weave_codegen::{
    builder::{CodeBuilder, CodeFragment, Renderable},
    render::ClassRenderer,
};
use weave_ir::{ClassArtifact, Dependency, FieldSpec, MethodSpec};

/// Renders classes as PSR-12 style PHP files, one class per file.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpRenderer;

impl ClassRenderer for PhpRenderer {
    fn file_extension(&self) -> &'static str {
        "php"
    }

    fn render_class(&self, class: &ClassArtifact) -> String {
        let mut builder = CodeBuilder::php();
        builder.emit(&PhpClass(class));
        builder.build()
    }
}

struct PhpClass<'a>(&'a ClassArtifact);

impl PhpClass<'_> {
    /// Imports that need a `use` statement.
    ///
    /// Types from the class's own namespace resolve without one.
    fn imports(&self) -> impl Iterator<Item = &Dependency> {
        let namespace = self.0.namespace();
        self.0.dependencies.iter().filter(move |dep| {
            dep.is_renamed() || dep.type_name.rsplit_once('\\').map(|(ns, _)| ns) != namespace
        })
    }

    fn header(&self) -> String {
        let mut header = format!("class {}", self.0.short_name());
        if let Some(parent) = &self.0.parent {
            header.push_str(&format!(" extends {parent}"));
        }
        if !self.0.capabilities.is_empty() {
            let capabilities: Vec<&str> = self.0.capabilities.iter().map(String::as_str).collect();
            header.push_str(&format!(" implements {}", capabilities.join(", ")));
        }
        header
    }

    fn members(&self) -> Vec<CodeFragment> {
        let class = self.0;
        let sections = class
            .fields
            .iter()
            .map(field)
            .chain(class.constructor.iter().map(constructor))
            .chain(class.methods.iter().map(method));

        let mut body = Vec::new();
        for (i, section) in sections.enumerate() {
            if i > 0 {
                body.push(CodeFragment::blank());
            }
            body.extend(section);
        }
        body
    }
}

impl Renderable for PhpClass<'_> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut out = vec![
            CodeFragment::line("<?php"),
            CodeFragment::blank(),
            CodeFragment::line("declare(strict_types=1);"),
            CodeFragment::blank(),
        ];

        if let Some(namespace) = self.0.namespace() {
            out.push(CodeFragment::line(format!("namespace {namespace};")));
            out.push(CodeFragment::blank());
        }

        let imports: Vec<CodeFragment> = self
            .imports()
            .map(|dep| {
                if dep.is_renamed() {
                    CodeFragment::line(format!("use {} as {};", dep.type_name, dep.alias))
                } else {
                    CodeFragment::line(format!("use {};", dep.type_name))
                }
            })
            .collect();
        if !imports.is_empty() {
            out.extend(imports);
            out.push(CodeFragment::blank());
        }

        out.push(CodeFragment::line(self.header()));
        out.push(CodeFragment::block("{", self.members(), Some("}".to_string())));
        out
    }
}

fn field(field: &FieldSpec) -> Vec<CodeFragment> {
    let mut decl = field.visibility.as_str().to_string();
    if field.is_static {
        decl.push_str(" static");
    }
    if field.readonly {
        decl.push_str(" readonly");
    }
    if let Some(ty) = &field.ty {
        decl.push(' ');
        decl.push_str(ty);
    }
    decl.push_str(&format!(" ${}", field.name));
    if let Some(default) = &field.default {
        decl.push_str(&format!(" = {default}"));
    }
    decl.push(';');
    CodeFragment::lines(&decl)
}

fn signature_head(method: &MethodSpec) -> String {
    format!("{} function {}", method.visibility.as_str(), method.name)
}

fn return_suffix(method: &MethodSpec) -> String {
    method
        .return_type
        .as_ref()
        .map(|ty| format!(": {ty}"))
        .unwrap_or_default()
}

fn doc(method: &MethodSpec) -> Vec<CodeFragment> {
    method
        .doc
        .as_ref()
        .map(|lines| vec![CodeFragment::doc_block(lines.iter().cloned())])
        .unwrap_or_default()
}

/// Constructors put each parameter on its own line so promoted
/// properties stay readable.
fn constructor(method: &MethodSpec) -> Vec<CodeFragment> {
    if method.params.is_empty() {
        return self::method(method);
    }

    let last = method.params.len() - 1;
    let params = method
        .params
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if i == last {
                CodeFragment::line(p)
            } else {
                CodeFragment::line(format!("{p},"))
            }
        })
        .collect();

    let mut out = doc(method);
    out.push(CodeFragment::line(format!("{}(", signature_head(method))));
    out.push(CodeFragment::indent(params));
    out.push(CodeFragment::block(
        format!("){} {{", return_suffix(method)),
        CodeFragment::lines(&method.body),
        Some("}".to_string()),
    ));
    out
}

fn method(method: &MethodSpec) -> Vec<CodeFragment> {
    let mut out = doc(method);
    out.push(CodeFragment::line(format!(
        "{}({}){}",
        signature_head(method),
        method.params.join(", "),
        return_suffix(method)
    )));
    out.push(CodeFragment::block(
        "{",
        CodeFragment::lines(&method.body),
        Some("}".to_string()),
    ));
    out
}
