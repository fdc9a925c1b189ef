//! Parameter descriptors and validation of raw front-end input.

use indexmap::IndexMap;
use regex::Regex;

use crate::{Error, Result};

/// Raw values collected by a front end, keyed by parameter name.
///
/// A non-repeat parameter carries at most one value.
pub type RawParams = IndexMap<String, Vec<String>>;

/// How a single value is checked.
#[derive(Debug, Clone)]
pub enum Validator {
    /// The value must match the whole pattern. Build it with
    /// [`Validator::pattern`] to anchor the expression.
    Pattern(Regex),
    /// The value must satisfy the predicate.
    Predicate(fn(&str) -> bool),
}

impl Validator {
    /// A pattern validator matching whole values only.
    ///
    /// The pattern is wrapped in `^(?:...)$`.
    pub fn pattern(re: &Regex) -> Self {
        let anchored =
            Regex::new(&format!("^(?:{})$", re.as_str())).unwrap_or_else(|_| re.clone());
        Validator::Pattern(anchored)
    }

    pub fn check(&self, value: &str) -> bool {
        match self {
            Validator::Pattern(re) => re
                .find(value)
                .is_some_and(|m| m.start() == 0 && m.end() == value.len()),
            Validator::Predicate(f) => f(value),
        }
    }
}

/// Declares one input accepted by a snippet.
#[derive(Debug, Clone)]
pub struct ParamDescriptor {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub validator: Option<Validator>,
    /// Message reported when the validator rejects a value.
    pub error_message: Option<String>,
    /// Accept an ordered sequence of values instead of one.
    pub repeat: bool,
    /// Used when no value is supplied.
    pub default: Option<String>,
}

impl ParamDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: false,
            validator: None,
            error_message: None,
            repeat: false,
            default: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn repeat(mut self) -> Self {
        self.repeat = true;
        self
    }

    pub fn pattern(mut self, re: Regex) -> Self {
        self.validator = Some(Validator::pattern(&re));
        self
    }

    pub fn predicate(mut self, f: fn(&str) -> bool) -> Self {
        self.validator = Some(Validator::Predicate(f));
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Check one value against the validator.
    pub fn check(&self, value: &str) -> Result<()> {
        match &self.validator {
            Some(validator) if !validator.check(value) => Err(Error::validation(
                &self.name,
                self.error_message
                    .clone()
                    .unwrap_or_else(|| format!("'{value}' is not accepted")),
            )),
            _ => Ok(()),
        }
    }
}

/// A validated parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    Repeated(Vec<String>),
}

/// Validated values handed to [`Snippet::add`](super::Snippet::add).
///
/// Every parameter declared by the snippet is present unless it is
/// optional, has no default and was not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamValues {
    values: IndexMap<String, ParamValue>,
}

impl ParamValues {
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// The value of a required single parameter.
    pub fn single(&self, name: &str) -> Result<&str> {
        match self.values.get(name) {
            Some(ParamValue::Single(v)) => Ok(v),
            Some(ParamValue::Repeated(_)) => Err(Error::validation(name, "expected a single value")),
            None => Err(Error::validation(name, "value is required")),
        }
    }

    /// The value of an optional single parameter.
    pub fn optional(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ParamValue::Single(v)) => Some(v),
            _ => None,
        }
    }

    /// The values of a repeat parameter; empty when absent.
    pub fn repeated(&self, name: &str) -> &[String] {
        match self.values.get(name) {
            Some(ParamValue::Repeated(vs)) => vs,
            Some(ParamValue::Single(v)) => std::slice::from_ref(v),
            None => &[],
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        self.values.insert(name.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Validate raw front-end input against a snippet's descriptors.
///
/// Unknown names, missing required values, surplus values for non-repeat
/// parameters and values rejected by a validator are reported as
/// [`Error::Validation`]. Missing values fall back to the descriptor's
/// default, which is validated like any other value.
pub fn validate_params(descriptors: &[ParamDescriptor], raw: &RawParams) -> Result<ParamValues> {
    if let Some(unknown) = raw
        .keys()
        .find(|k| !descriptors.iter().any(|d| &d.name == *k))
    {
        return Err(Error::validation(unknown, "unknown parameter"));
    }

    let mut values = ParamValues::default();
    for descriptor in descriptors {
        let supplied: Vec<String> = raw
            .get(&descriptor.name)
            .map(|vs| vs.iter().map(|v| v.trim().to_string()).collect())
            .unwrap_or_default();

        let supplied = if supplied.is_empty() {
            match (&descriptor.default, descriptor.required) {
                (Some(default), _) => vec![default.clone()],
                (None, true) => return Err(Error::validation(&descriptor.name, "value is required")),
                (None, false) => continue,
            }
        } else {
            supplied
        };

        if !descriptor.repeat && supplied.len() > 1 {
            return Err(Error::validation(
                &descriptor.name,
                format!("expected one value, got {}", supplied.len()),
            ));
        }

        for value in &supplied {
            descriptor.check(value)?;
        }

        let value = if descriptor.repeat {
            ParamValue::Repeated(supplied)
        } else {
            let mut supplied = supplied;
            ParamValue::Single(supplied.remove(0))
        };
        values.insert(descriptor.name.clone(), value);
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower() -> Regex {
        Regex::new(r"^[a-z_]+$").unwrap()
    }

    fn descriptors() -> Vec<ParamDescriptor> {
        vec![
            ParamDescriptor::new("config_name", "XML config filename")
                .required()
                .repeat()
                .pattern(lower())
                .error_message("Only lower case alphabet and underscore characters"),
            ParamDescriptor::new("field_name", "Configuration field name")
                .required()
                .pattern(lower()),
            ParamDescriptor::new("scope", "Config scope").default_value("global"),
        ]
    }

    fn raw(pairs: &[(&str, &[&str])]) -> RawParams {
        pairs
            .iter()
            .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_valid_params() {
        let values = validate_params(
            &descriptors(),
            &raw(&[("config_name", &["example", "other"]), ("field_name", &["id"])]),
        )
        .unwrap();

        assert_eq!(values.repeated("config_name"), ["example", "other"]);
        assert_eq!(values.single("field_name").unwrap(), "id");
        assert_eq!(values.optional("scope"), Some("global"));
    }

    #[test]
    fn test_pattern_mismatch_uses_error_message() {
        let err = validate_params(
            &descriptors(),
            &raw(&[("config_name", &["Example"]), ("field_name", &["id"])]),
        )
        .unwrap_err();

        match err {
            Error::Validation { param, message } => {
                assert_eq!(param, "config_name");
                assert_eq!(message, "Only lower case alphabet and underscore characters");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_required() {
        let err = validate_params(&descriptors(), &raw(&[("config_name", &["example"])])).unwrap_err();
        assert!(matches!(err, Error::Validation { ref param, .. } if param == "field_name"));
    }

    #[test]
    fn test_required_repeat_needs_one_value() {
        let err = validate_params(
            &descriptors(),
            &raw(&[("config_name", &[]), ("field_name", &["id"])]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation { ref param, .. } if param == "config_name"));
    }

    #[test]
    fn test_surplus_values_for_single_param() {
        let err = validate_params(
            &descriptors(),
            &raw(&[("config_name", &["example"]), ("field_name", &["id", "name"])]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation { ref param, .. } if param == "field_name"));
    }

    #[test]
    fn test_unknown_param() {
        let err = validate_params(
            &descriptors(),
            &raw(&[("config_name", &["example"]), ("field_name", &["id"]), ("colour", &["red"])]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation { ref param, .. } if param == "colour"));
    }

    #[test]
    fn test_pattern_must_cover_whole_value() {
        let v = Validator::pattern(&Regex::new("[a-z]+").unwrap());
        assert!(v.check("abc"));
        assert!(!v.check("abc1"));
    }

    #[test]
    fn test_alternation_matches_whole_value() {
        let v = Validator::pattern(&Regex::new("a|ab").unwrap());
        assert!(v.check("a"));
        assert!(v.check("ab"));
        assert!(!v.check("abc"));

        let d = ParamDescriptor::new("mode", "Mode").pattern(Regex::new("get|getter").unwrap());
        assert!(d.check("getter").is_ok());
        assert!(d.check("gett").is_err());
    }

    #[test]
    fn test_predicate_validator() {
        let d = ParamDescriptor::new("count", "How many")
            .predicate(|v| v.parse::<u32>().is_ok())
            .error_message("must be a number");
        assert!(d.check("12").is_ok());
        assert!(d.check("twelve").is_err());
    }

    #[test]
    fn test_values_are_trimmed() {
        let values = validate_params(
            &descriptors(),
            &raw(&[("config_name", &[" example "]), ("field_name", &["id"])]),
        )
        .unwrap();
        assert_eq!(values.repeated("config_name"), ["example"]);
    }
}
