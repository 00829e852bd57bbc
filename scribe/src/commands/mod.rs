mod build;
mod check;
mod completions;
mod new;

use std::path::PathBuf;

use build::BuildCommand;
use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use cscribe_compiler::{Compiler, DirectoryLocator};
use eyre::Result;
use new::NewCommand;

use crate::config::{self, Config};

/// Extension trait for exiting on config errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for config::Result<T> {
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

#[derive(Parser)]
#[command(name = "cscribe")]
#[command(version)]
#[command(about = "Generate C# type declarations and check that they compile")]
pub(crate) struct Cli {
    /// Path to cscribe.toml (defaults to ./cscribe.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::New(cmd) => cmd.run(&self.load_config()).await,
            Commands::Check(cmd) => cmd.run(&self.load_config()).await,
            Commands::Build(cmd) => cmd.run(&self.load_config()).await,
            Commands::Completions(cmd) => cmd.run(),
        }
    }

    fn load_config(&self) -> Config {
        Config::discover(self.config.as_deref()).unwrap_or_exit()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a class or struct declaration
    New(NewCommand),

    /// Compile source files and report errors without writing output
    Check(CheckCommand),

    /// Compile source files into a module
    Build(BuildCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Options shared by every command that compiles.
#[derive(Args)]
pub(crate) struct CompileArgs {
    /// Resolve anchor libraries as `<dir>/<library>.dll` instead of by name
    #[arg(long, value_name = "DIR")]
    lib_dir: Option<PathBuf>,

    /// Additional library reference (repeatable)
    #[arg(short = 'r', long = "reference", value_name = "PATH")]
    references: Vec<PathBuf>,
}

impl CompileArgs {
    /// A compiler for the config's profile plus these overrides.
    pub fn compiler(&self, config: &Config) -> Compiler {
        let mut options = config.compiler.clone();
        options.references.extend(self.references.iter().cloned());

        let compiler = Compiler::with_options(options);
        match self.lib_dir.as_deref() {
            Some(dir) => compiler.with_locator(DirectoryLocator::new(dir)),
            None => compiler,
        }
    }
}

/// Exit with status 1 after rendering a failed report.
fn exit_unless(valid: bool) {
    if !valid {
        std::process::exit(1);
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
