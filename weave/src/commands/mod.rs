mod add;
mod bake;
mod check;
mod completions;
mod init;
mod list;

use add::AddCommand;
use bake::BakeCommand;
use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use init::InitCommand;
use list::ListCommand;
use weave_codegen::Diagnostic;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for weave_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Print merge warnings collected during a run.
pub(crate) fn print_diagnostics<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) {
    for diag in diagnostics {
        eprintln!("{diag}");
    }
}

#[derive(Parser)]
#[command(name = "weave")]
#[command(version)]
#[command(about = "Generate Magento 2 modules from TOML manifests")]
pub(crate) struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Init(cmd) => cmd.run(),
            Commands::Bake(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Add(cmd) => cmd.run(),
            Commands::List(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new weave.toml
    Init(InitCommand),

    /// Generate the module described by weave.toml
    Bake(BakeCommand),

    /// Validate weave.toml and run every snippet without writing files
    Check(CheckCommand),

    /// Append a snippet invocation to weave.toml
    Add(AddCommand),

    /// List available snippets and their parameters
    List(ListCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
