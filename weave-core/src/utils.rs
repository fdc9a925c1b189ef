//! Name transforms used when deriving identifiers from parameters.

/// Convert a string to PascalCase (e.g., "config_name" -> "ConfigName")
///
/// Each underscore-separated word gets its first character upper-cased;
/// the rest of the word is left untouched.
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Convert a string to snake_case (e.g., "ModuleName" -> "module_name")
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('_');
        }
        result.extend(c.to_lowercase());
    }
    result.replace('-', "_")
}

/// Convert a string to kebab-case (e.g., "ModuleName" -> "module-name")
pub fn to_kebab_case(s: &str) -> String {
    to_snake_case(s).replace('_', "-")
}
