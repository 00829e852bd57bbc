use crate::{
    Result,
    pipeline::{CompilationContext, Phase},
    syntax::{ParseOptions, parse},
};

/// Parses each source fragment independently under the pinned language
/// version.
pub struct ParsePhase;

impl Phase for ParsePhase {
    fn name(&self) -> &'static str {
        "parse"
    }

    fn description(&self) -> &'static str {
        "Tokenize and parse source fragments"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let options = ParseOptions {
            language_version: ctx.options.language_version,
        };
        for (index, source) in std::mem::take(&mut ctx.sources).into_iter().enumerate() {
            let tree = parse(source, index, options);
            tracing::trace!(index, types = tree.types.len(), "parsed source");
            ctx.diagnostics.extend(tree.diagnostics.iter().cloned());
            ctx.trees.push(tree);
        }
        Ok(())
    }
}
