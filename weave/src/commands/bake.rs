use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use weave_codegen::language::LanguageCodegen;
use weave_codegen_php::Generator;
use weave_manifest::WeaveToml;

use super::{UnwrapOrExit, print_diagnostics};

#[derive(Args)]
pub struct BakeCommand {
    /// Path to weave.toml (defaults to ./weave.toml)
    #[arg(short, long, default_value = "weave.toml")]
    pub config: PathBuf,

    /// Output directory; the module lands in <output>/<Vendor>/<Name>
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview generated files without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Leave files that already exist untouched
    #[arg(long)]
    pub keep_existing: bool,
}

impl BakeCommand {
    pub fn run(&self) -> Result<()> {
        let weave_toml = WeaveToml::open(&self.config).unwrap_or_exit();
        let manifest = weave_toml.manifest();
        tracing::debug!(config = %self.config.display(), snippets = manifest.snippets.len(), "loaded manifest");

        let generator = Generator::new(manifest);
        let mut generated = generator
            .build()
            .wrap_err("Failed to generate module")?;
        print_diagnostics(&generated.diagnostics);

        if self.dry_run {
            let files = generated.files.preview();
            for file in &files {
                println!("── {} ──", file.path);
                println!("{}", file.content);
            }
            println!("── Summary ──");
            println!("{} files would be generated", files.len());
            return Ok(());
        }

        if self.keep_existing {
            generated.files.keep_existing();
        }
        let stats = generated
            .files
            .write_all(&self.output)
            .wrap_err("Failed to write module")?;

        println!("{} v{}", generated.module_name, manifest.module.version);
        if let Some(description) = &manifest.module.description {
            println!("{description}");
        }
        println!();
        println!("Snippets ({}):", manifest.snippets.len());
        for invocation in &manifest.snippets {
            println!("  {}", invocation.snippet);
        }
        println!();
        println!(
            "Generated: {} ({} written, {} kept)",
            self.output
                .join(&manifest.module.vendor)
                .join(&manifest.module.name)
                .display(),
            stats.written,
            stats.skipped
        );

        Ok(())
    }
}
