use std::path::PathBuf;

use clap::Args;
use cscribe_syntax::CodeSaver;
use eyre::Result;

use super::{CompileArgs, exit_unless};
use crate::{
    config::Config,
    ops::{self, Member, TypeSpec},
    reports::{GenerateReport, Report, SourceFile, TerminalOutput},
};

#[derive(Args)]
pub struct NewCommand {
    /// Type name
    name: String,

    /// Namespace to declare the type in (none when omitted)
    #[arg(short, long, default_value = "")]
    namespace: String,

    /// Declare a struct instead of a class
    #[arg(long = "struct")]
    is_struct: bool,

    /// Use a file-scoped namespace declaration
    #[arg(long)]
    file_scoped: bool,

    /// Field as name:type (repeatable)
    #[arg(long = "field", value_name = "NAME:TYPE")]
    fields: Vec<Member>,

    /// Public auto-property as name:type (repeatable)
    #[arg(long = "property", value_name = "NAME:TYPE")]
    properties: Vec<Member>,

    /// Primary constructor parameter as name:type (repeatable)
    #[arg(long = "primary", value_name = "NAME:TYPE")]
    primary: Vec<Member>,

    /// Base class or interface, in declaration order (repeatable)
    #[arg(long = "base", value_name = "TYPE")]
    base_types: Vec<String>,

    /// Namespace to import (repeatable)
    #[arg(short, long = "using", value_name = "NAMESPACE")]
    usings: Vec<String>,

    /// Save to this file instead of printing
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Compile the generated source and report errors
    #[arg(long)]
    check: bool,

    #[command(flatten)]
    compile: CompileArgs,
}

impl NewCommand {
    pub async fn run(&self, config: &Config) -> Result<()> {
        let unit = ops::generate(&self.spec())?;

        let saver = CodeSaver::from_format_options(config.format.clone());
        let code = saver.save_code_as_string(&unit);
        if let Some(path) = &self.output {
            saver.save_code_to_file(&unit, path)?;
        }

        let check = if self.check {
            let name = match &self.output {
                Some(path) => path.display().to_string(),
                None => format!("{}.cs", self.name),
            };
            let sources = vec![SourceFile::new(name, code.clone())];
            Some(ops::check_sources(&self.compile.compiler(config), sources).await?)
        } else {
            None
        };

        let report = GenerateReport {
            code,
            written: self.output.clone(),
            check,
        };
        report.render(&mut TerminalOutput::new());

        exit_unless(report.is_valid());
        Ok(())
    }

    fn spec(&self) -> TypeSpec {
        TypeSpec {
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            is_struct: self.is_struct,
            file_scoped: self.file_scoped,
            usings: self.usings.clone(),
            base_types: self.base_types.clone(),
            fields: self.fields.clone(),
            properties: self.properties.clone(),
            primary: self.primary.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::commands::{Cli, Commands};

    #[test]
    fn test_parse_new_command() {
        let cli = Cli::try_parse_from([
            "cscribe", "new", "Point", "--struct", "-n", "Geometry", "--field", "x:int",
            "--field", "y:int", "--primary", "label:string", "--check",
        ])
        .unwrap();

        let Commands::New(cmd) = cli.command else {
            panic!("expected new command");
        };
        let spec = cmd.spec();
        assert!(spec.is_struct);
        assert_eq!(spec.namespace, "Geometry");
        assert_eq!(spec.fields.len(), 2);
        assert_eq!(spec.primary[0].ty, "string");
        assert!(cmd.check);
    }

    #[test]
    fn test_reject_malformed_member() {
        let result = Cli::try_parse_from(["cscribe", "new", "A", "--field", "x"]);
        assert!(result.is_err());
    }
}
