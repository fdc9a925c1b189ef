use std::{io::IsTerminal as _, path::PathBuf};

use clap::Args;
use dialoguer::{Input, theme::ColorfulTheme};
use eyre::{Context, Result, eyre};
use indexmap::IndexMap;
use weave_codegen::snippet::{ParamDescriptor, RawParams, Snippet, validate_params};
use weave_codegen_php::snippets;
use weave_manifest::WeaveToml;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct AddCommand {
    /// Snippet to add (see `weave list`)
    snippet: String,

    /// Parameter as key=value; repeat the flag for repeatable parameters
    #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    params: Vec<(String, String)>,

    /// Path to weave.toml
    #[arg(short, long, default_value = "weave.toml")]
    config: PathBuf,
}

fn parse_param(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))
}

fn collect(params: &[(String, String)]) -> RawParams {
    let mut raw: RawParams = IndexMap::new();
    for (key, value) in params {
        raw.entry(key.clone()).or_default().push(value.clone());
    }
    raw
}

impl AddCommand {
    pub fn run(&self) -> Result<()> {
        let registry = snippets::builtin();
        let snippet = registry.get(&self.snippet)?;

        let mut raw = collect(&self.params);
        if std::io::stdin().is_terminal() {
            Self::prompt_missing(snippet, &mut raw)?;
        }
        validate_params(&snippet.params(), &raw)?;
        tracing::debug!(snippet = snippet.name(), params = raw.len(), "parameters accepted");

        let mut weave_toml = WeaveToml::open(&self.config).unwrap_or_exit();
        weave_toml.append_snippet(snippet.name(), &raw).unwrap_or_exit();
        weave_toml.save().unwrap_or_exit();

        println!("Added snippet '{}' to {}", snippet.name(), self.config.display());
        Ok(())
    }

    /// Ask for every required parameter that was not given on the command line.
    fn prompt_missing(snippet: &dyn Snippet, raw: &mut RawParams) -> Result<()> {
        for param in snippet.params() {
            if !param.required || param.default.is_some() || raw.contains_key(&param.name) {
                continue;
            }
            let values = Self::prompt(&param)?;
            raw.insert(param.name.clone(), values);
        }
        Ok(())
    }

    fn prompt(param: &ParamDescriptor) -> Result<Vec<String>> {
        let prompt = if param.repeat {
            format!("{} (comma separated)", param.description)
        } else {
            param.description.clone()
        };
        let input: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                split(input, param.repeat)
                    .iter()
                    .try_for_each(|v| param.check(v).map_err(|e| e.to_string()))
            })
            .interact_text()
            .wrap_err_with(|| format!("Failed to read '{}'", param.name))?;

        let values = split(&input, param.repeat);
        if values.is_empty() {
            return Err(eyre!("'{}' needs a value", param.name));
        }
        Ok(values)
    }
}

fn split(input: &str, repeat: bool) -> Vec<String> {
    if repeat {
        input
            .split(',')
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect()
    } else {
        vec![input.trim().to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("config_name=example").unwrap(),
            ("config_name".to_string(), "example".to_string())
        );
        assert!(parse_param("config_name").is_err());
        assert!(parse_param("=example").is_err());
    }

    #[test]
    fn test_repeated_flags_collect_in_order() {
        let raw = collect(&[
            ("config_name".to_string(), "example".to_string()),
            ("field_name".to_string(), "name".to_string()),
            ("config_name".to_string(), "carrier".to_string()),
        ]);
        assert_eq!(raw["config_name"], vec!["example", "carrier"]);
        assert_eq!(raw.len(), 2);
    }

    #[test]
    fn test_split() {
        assert_eq!(split("a, b,,c", true), vec!["a", "b", "c"]);
        assert_eq!(split(" a,b ", false), vec!["a,b"]);
    }

    #[test]
    fn test_add_appends_invocation() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("weave.toml");
        std::fs::write(
            &config,
            "[module]\nvendor = \"Experius\"\nname = \"ConfigTypes\"\n",
        )
        .unwrap();

        let cmd = AddCommand {
            snippet: "configuration_type".to_string(),
            params: vec![
                ("config_name".to_string(), "example".to_string()),
                ("node_name".to_string(), "example".to_string()),
                ("field_name".to_string(), "name".to_string()),
            ],
            config: config.clone(),
        };
        cmd.run().unwrap();

        let weave_toml = WeaveToml::open(&config).unwrap();
        let snippets = &weave_toml.manifest().snippets;
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].snippet, "configuration_type");
        assert_eq!(snippets[0].raw_params()["field_name"], vec!["name"]);
    }
}
