//! Merging of class contributions that share a type name.

use weave_ir::{ClassArtifact, MethodSpec, absolute_name};

use super::Merged;
use crate::{Error, Result};

/// Check a single contribution before it reaches the merge.
pub(crate) fn validate(class: &ClassArtifact) -> Result<()> {
    if class.type_name.trim_start_matches('\\').is_empty() {
        return Err(Error::structural("class has an empty type name"));
    }

    let target = &class.type_name;
    let mut seen = Vec::new();
    for method in class.methods.iter().chain(class.constructor.iter()) {
        if method.name.is_empty() {
            return Err(Error::structural(format!("'{target}' declares a method without a name")));
        }
        if seen.contains(&method.name.as_str()) {
            return Err(Error::structural(format!(
                "'{target}' declares method '{}' twice",
                method.name
            )));
        }
        seen.push(method.name.as_str());
    }

    for (i, field) in class.fields.iter().enumerate() {
        if field.name.is_empty() {
            return Err(Error::structural(format!("'{target}' declares a field without a name")));
        }
        if class.fields[..i].iter().any(|f| f.name == field.name) {
            return Err(Error::structural(format!(
                "'{target}' declares field '{}' twice",
                field.name
            )));
        }
    }

    for (i, dep) in class.dependencies.iter().enumerate() {
        if class.dependencies[..i].iter().any(|d| d.alias == dep.alias) {
            return Err(Error::structural(format!(
                "'{target}' imports two types as '{}'",
                dep.alias
            )));
        }
    }

    Ok(())
}

fn same_type(a: &str, b: &str) -> bool {
    a.trim_start_matches('\\') == b.trim_start_matches('\\')
}

/// Merge `incoming` into a copy of `existing`.
///
/// Returns the merged class and the warnings produced; on error nothing
/// has been modified.
pub(crate) fn merge(existing: &ClassArtifact, incoming: ClassArtifact) -> Result<Merged<ClassArtifact>> {
    let target = existing.type_name.clone();
    let mut merged = existing.clone();
    let mut warnings = Vec::new();

    merged.parent = match (existing.parent.as_deref(), incoming.parent) {
        (Some(a), Some(b)) if !same_type(a, &b) => {
            return Err(Error::conflict(
                &target,
                format!("extends both '{a}' and '{b}'"),
            ));
        }
        (Some(a), _) => Some(a.to_string()),
        (None, b) => b,
    };

    merged.capabilities = existing
        .capabilities
        .iter()
        .chain(incoming.capabilities.iter())
        .map(|c| absolute_name(c))
        .collect();

    for dep in incoming.dependencies {
        match merged.dependencies.iter().find(|d| d.alias == dep.alias) {
            Some(current) if current.type_name != dep.type_name => {
                return Err(Error::conflict(
                    &target,
                    format!(
                        "'{}' imports both '{}' and '{}'",
                        dep.alias, current.type_name, dep.type_name
                    ),
                ));
            }
            Some(_) => {}
            None => merged.dependencies.push(dep),
        }
    }

    for field in incoming.fields {
        match merged.fields.iter_mut().find(|f| f.name == field.name) {
            Some(current) if *current != field => {
                warnings.push(format!(
                    "field '${}' redeclared, keeping the later declaration",
                    field.name
                ));
                *current = field;
            }
            Some(_) => {}
            None => merged.fields.push(field),
        }
    }

    merged.constructor = match (merged.constructor.take(), incoming.constructor) {
        (Some(current), Some(new)) => Some(merge_method(&target, current, new, &mut warnings)?),
        (current, new) => current.or(new),
    };

    for method in incoming.methods {
        match merged.methods.iter().position(|m| m.name == method.name) {
            Some(i) => {
                let current = merged.methods[i].clone();
                merged.methods[i] = merge_method(&target, current, method, &mut warnings)?;
            }
            None => merged.methods.push(method),
        }
    }

    Ok(Merged {
        value: merged,
        warnings,
    })
}

fn merge_method(
    target: &str,
    current: MethodSpec,
    incoming: MethodSpec,
    warnings: &mut Vec<String>,
) -> Result<MethodSpec> {
    if current.body != incoming.body {
        return Err(Error::conflict(
            target,
            format!("method '{}' has two different bodies", incoming.name),
        ));
    }
    if current.same_signature(&incoming) {
        return Ok(current);
    }
    warnings.push(format!(
        "method '{}' redeclared with a different signature, keeping the later declaration",
        incoming.name
    ));
    Ok(incoming)
}
