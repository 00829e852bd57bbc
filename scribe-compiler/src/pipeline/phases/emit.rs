use std::{fs::File, io::BufWriter};

use indexmap::IndexSet;

use crate::{
    Result,
    diagnostic::{Diagnostic, codes},
    module::Module,
    pipeline::{CompilationContext, Phase},
};

/// Builds the module image and writes it to the output path, or to a
/// discarded buffer when compiling in memory.
/// Nothing is written when an earlier phase reported an error.
pub struct EmitPhase;

impl Phase for EmitPhase {
    fn name(&self) -> &'static str {
        "emit"
    }

    fn description(&self) -> &'static str {
        "Write the compiled module"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        if ctx.has_errors() {
            tracing::debug!("skipping emit, compilation has errors");
            return Ok(());
        }

        let usings: IndexSet<String> = ctx
            .options
            .usings
            .iter()
            .chain(ctx.trees.iter().flat_map(|t| &t.usings))
            .cloned()
            .collect();
        let module = Module {
            name: ctx.name.clone(),
            language_version: ctx.options.language_version,
            output_kind: ctx.options.output_kind,
            optimization: ctx.options.optimization,
            overflow_checks: ctx.options.overflow_checks,
            usings: usings.into_iter().collect(),
            references: ctx
                .references
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            types: ctx
                .trees
                .iter()
                .flat_map(|t| t.types.iter().cloned())
                .collect(),
        };

        match &ctx.output {
            Some(path) => {
                let written =
                    File::create(path).and_then(|file| module.write_to(&mut BufWriter::new(file)));
                if let Err(e) = written {
                    let message = format!("Cannot open '{}' for writing -- '{e}'", path.display());
                    ctx.add_diagnostic(Diagnostic::error(codes::CANNOT_WRITE_OUTPUT, message));
                    return Ok(());
                }
                tracing::info!(path = %path.display(), types = module.types.len(), "wrote module");
            }
            None => {
                // Transient image, dropped once emission is known to succeed.
                let mut image = Vec::new();
                if let Err(e) = module.write_to(&mut image) {
                    let message = format!("Cannot write module image -- '{e}'");
                    ctx.add_diagnostic(Diagnostic::error(codes::CANNOT_WRITE_OUTPUT, message));
                    return Ok(());
                }
                tracing::debug!(bytes = image.len(), "emitted module in memory");
            }
        }

        ctx.module = Some(module);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;
    use crate::{options::CompilerOptions, pipeline::ParsePhase};

    fn context(source: &str, output: Option<std::path::PathBuf>) -> CompilationContext {
        let mut ctx = CompilationContext::new(
            Arc::new(CompilerOptions::default()),
            vec![source.to_string()],
            output,
        );
        ParsePhase.run(&mut ctx).unwrap();
        ctx
    }

    #[test]
    fn test_emit_writes_module() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Sample.dll");
        let mut ctx = context("using System.Text;\nclass A { }", Some(path.clone()));

        EmitPhase.run(&mut ctx).unwrap();

        let module = Module::load(&path).unwrap();
        assert_eq!(module.name, "Sample");
        assert_eq!(module.usings.len(), 7);
        assert!(module.find_type("A").is_some());
    }

    #[test]
    fn test_errors_prevent_emit() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Broken.dll");
        let mut ctx = context("class A {", Some(path.clone()));

        EmitPhase.run(&mut ctx).unwrap();

        assert!(ctx.module.is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_output_is_a_diagnostic() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("Out.dll");
        let mut ctx = context("class A { }", Some(path));

        EmitPhase.run(&mut ctx).unwrap();

        assert_eq!(ctx.error_count(), 1);
        assert_eq!(ctx.diagnostics[0].id, codes::CANNOT_WRITE_OUTPUT);
    }
}
