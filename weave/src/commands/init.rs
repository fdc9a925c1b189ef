use std::path::PathBuf;

use clap::Args;
use dialoguer::{Input, theme::ColorfulTheme};
use eyre::{Context, Result, bail};
use weave_core::{File, FileRules, Overwrite, WriteResult};
use weave_manifest::{Manifest, module_section};

#[derive(Args)]
pub struct InitCommand {
    /// Vendor name, e.g. "Experius" (prompted when omitted)
    #[arg(long)]
    pub vendor: Option<String>,

    /// Module name, e.g. "ConfigTypes" (prompted when omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// Module description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Directory to create weave.toml in
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

fn is_pascal_case(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase()) && chars.all(|c| c.is_ascii_alphanumeric())
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        let vendor = match &self.vendor {
            Some(vendor) => vendor.clone(),
            None => Self::prompt_name("Vendor name")?,
        };
        let name = match &self.name {
            Some(name) => name.clone(),
            None => Self::prompt_name("Module name")?,
        };

        let content = module_section(&vendor, &name, self.description.as_deref());
        // Reject invalid names before anything touches the disk.
        if let Err(e) = Manifest::from_str_with_filename(&content, "weave.toml") {
            eprintln!("{:?}", miette::Report::new(*e));
            std::process::exit(1);
        }

        let file = File::new("weave.toml", content).with_rules(FileRules {
            overwrite: Overwrite::IfMissing,
        });
        if file.write(&self.output)? == WriteResult::Skipped {
            bail!("{} already exists", file.target(&self.output).display());
        }

        println!("Created {}", file.target(&self.output).display());
        println!();
        println!("Next steps:");
        println!("  weave list");
        println!("  weave add configuration_type");
        println!("  weave bake");
        Ok(())
    }

    fn prompt_name(prompt: &str) -> Result<String> {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .validate_with(|input: &String| -> std::result::Result<(), &str> {
                if is_pascal_case(input) {
                    Ok(())
                } else {
                    Err("must start with an upper case letter and contain only letters and digits")
                }
            })
            .interact_text()
            .wrap_err("Failed to read input")
    }
}
