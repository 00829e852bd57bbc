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
pub struct CheckCommand {
    /// Source files, compiled together
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print the compile result as JSON instead of rendered diagnostics
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    compile: CompileArgs,
}

impl CheckCommand {
    pub async fn run(&self, config: &Config) -> Result<()> {
        let compiler = self.compile.compiler(config);
        let report = ops::check(&compiler, &self.files).await?;

        if self.json {
            print_json(report.result())?;
        } else {
            report.render(&mut TerminalOutput::new());
        }

        exit_unless(report.is_valid());
        Ok(())
    }
}
