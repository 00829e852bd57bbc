use std::sync::Arc;

use crate::{
    Result,
    pipeline::{CompilationContext, Phase},
    references::{TypeLocator, resolve_references},
};

/// Resolves explicit references and anchor libraries into the
/// de-duplicated reference set.
pub struct ReferencePhase {
    locator: Arc<dyn TypeLocator>,
}

impl ReferencePhase {
    pub fn new(locator: Arc<dyn TypeLocator>) -> Self {
        Self { locator }
    }
}

impl Phase for ReferencePhase {
    fn name(&self) -> &'static str {
        "references"
    }

    fn description(&self) -> &'static str {
        "Resolve referenced libraries"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let resolved = resolve_references(
            &ctx.options.references,
            &ctx.options.anchors,
            self.locator.as_ref(),
        );
        tracing::debug!(count = resolved.paths.len(), "resolved references");
        ctx.references = resolved.paths;
        ctx.diagnostics.extend(resolved.diagnostics);
        Ok(())
    }
}
