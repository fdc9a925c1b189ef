use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use weave_codegen::snippet::ParamDescriptor;
use weave_codegen_php::snippets;
use weave_manifest::WeaveToml;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct ListCommand {
    /// Also list the snippet invocations in this weave.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

fn param_flags(param: &ParamDescriptor) -> String {
    let mut flags = Vec::new();
    if param.required {
        flags.push("required".to_string());
    }
    if param.repeat {
        flags.push("repeatable".to_string());
    }
    if let Some(default) = &param.default {
        flags.push(format!("default: {default}"));
    }
    if flags.is_empty() {
        String::new()
    } else {
        format!(" ({})", flags.join(", "))
    }
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let registry = snippets::builtin();

        println!("Snippets:");
        for snippet in registry.iter() {
            println!("  {} - {}", snippet.name(), snippet.label());
            if !snippet.description().is_empty() {
                println!("    {}", snippet.description());
            }
            for param in snippet.params() {
                println!(
                    "      {}{}: {}",
                    param.name,
                    param_flags(&param),
                    param.description
                );
            }
        }

        if let Some(config) = &self.config {
            let weave_toml = WeaveToml::open(config).unwrap_or_exit();
            let manifest = weave_toml.manifest();
            println!("\n{} ({}):", manifest.module_name(), config.display());
            if manifest.snippets.is_empty() {
                println!("  No snippets used");
            }
            for invocation in &manifest.snippets {
                let params: Vec<String> = invocation
                    .raw_params()
                    .iter()
                    .map(|(k, vs)| format!("{k}={}", vs.join(",")))
                    .collect();
                println!("  {} {}", invocation.snippet, params.join(" "));
            }
        }

        Ok(())
    }
}
