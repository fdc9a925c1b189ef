//! TOML section rendering for editing weave.toml in place.
//!
//! Sections are appended as text so existing formatting and comments
//! survive an edit.

use indexmap::IndexMap;

fn quote(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

/// Render the `[module]` table of a new manifest.
///
/// # Examples
///
/// ```
/// use weave_manifest::module_section;
///
/// let section = module_section("Experius", "Test", None);
/// assert_eq!(section, "[module]\nvendor = \"Experius\"\nname = \"Test\"\nversion = \"1.0.0\"\n");
/// ```
pub fn module_section(vendor: &str, name: &str, description: Option<&str>) -> String {
    let mut section = format!(
        "[module]\nvendor = {}\nname = {}\nversion = \"1.0.0\"\n",
        quote(vendor),
        quote(name)
    );
    if let Some(description) = description {
        section.push_str(&format!("description = {}\n", quote(description)));
    }
    section
}

/// Render a `[[snippets]]` entry.
///
/// A parameter with one value is written as a string, several values as
/// an array.
///
/// # Examples
///
/// ```
/// use indexmap::IndexMap;
/// use weave_manifest::snippet_section;
///
/// let mut params = IndexMap::new();
/// params.insert("field_name".to_string(), vec!["id".to_string()]);
///
/// assert_eq!(
///     snippet_section("configuration_type", &params),
///     "[[snippets]]\nuse = \"configuration_type\"\n\n[snippets.params]\nfield_name = \"id\"\n"
/// );
/// ```
pub fn snippet_section(snippet: &str, params: &IndexMap<String, Vec<String>>) -> String {
    let mut section = format!("[[snippets]]\nuse = {}\n", quote(snippet));
    if params.is_empty() {
        return section;
    }

    section.push_str("\n[snippets.params]\n");
    for (key, values) in params {
        let value = match values.as_slice() {
            [one] => quote(one),
            many => format!(
                "[{}]",
                many.iter().map(|v| quote(v)).collect::<Vec<_>>().join(", ")
            ),
        };
        section.push_str(&format!("{key} = {value}\n"));
    }
    section
}

/// Append a section to TOML content with proper spacing.
pub fn append_section(content: &str, section: &str) -> String {
    if content.trim().is_empty() {
        return format!("{}\n", section.trim());
    }
    format!("{}\n\n{}\n", content.trim_end(), section.trim())
}
