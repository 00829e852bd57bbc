use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::{CompileArgs, exit_unless, print_json};
use crate::{
    config::Config,
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct BuildCommand {
    /// Module file to write; its stem names the module
    #[arg(short, long)]
    output: PathBuf,

    /// Source files, compiled together
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print the compile result as JSON instead of rendered diagnostics
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    compile: CompileArgs,
}

impl BuildCommand {
    pub async fn run(&self, config: &Config) -> Result<()> {
        let compiler = self.compile.compiler(config);
        let report = ops::build(&compiler, &self.output, &self.files).await?;

        if self.json {
            print_json(report.check.result())?;
        } else {
            report.render(&mut TerminalOutput::new());
        }

        exit_unless(report.check.is_valid());
        Ok(())
    }
}
