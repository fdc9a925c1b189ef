use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use weave_codegen::Severity;
use weave_codegen_php::Generator;
use weave_manifest::WeaveToml;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct CheckCommand {
    /// Path to weave.toml (defaults to ./weave.toml)
    #[arg(short, long, default_value = "weave.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let weave_toml = WeaveToml::open(&self.config).unwrap_or_exit();
        let manifest = weave_toml.manifest();

        let output = Generator::new(manifest)
            .assemble()
            .wrap_err("Validation failed")?;

        let mut has_warnings = false;
        for diag in &output.diagnostics {
            match diag.severity {
                Severity::Error | Severity::Warning => {
                    has_warnings |= diag.severity == Severity::Warning;
                    eprintln!("{}: {}", diag.severity, diag.message);
                    if let Some(loc) = &diag.location {
                        eprintln!("  --> {loc}");
                    }
                }
                Severity::Info => println!("info: {}", diag.message),
            }
        }

        if output.has_errors() {
            std::process::exit(1);
        }
        if has_warnings {
            println!();
        }

        println!("✓ {} is valid\n", self.config.display());
        println!("  {} v{}", output.module_name, manifest.module.version);
        if let Some(description) = &manifest.module.description {
            println!("  {description}");
        }
        println!();

        let count = output.file_count();
        println!("  {} file{}:", count, if count == 1 { "" } else { "s" });
        for path in output
            .classes
            .iter()
            .map(|c| format!("{}.php", c.path))
            .chain(output.trees.iter().map(|t| t.path.clone()))
            .chain(output.statics.iter().map(|s| s.path.clone()))
        {
            println!("    {path}");
        }

        Ok(())
    }
}
