use std::sync::Arc;

use super::{
    CompilationContext, Phase,
    phases::{DeclarePhase, EmitPhase, ParsePhase, ReferencePhase},
};
use crate::{Result, references::TypeLocator};

/// Runs the built-in phases in order.
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
}

impl Pipeline {
    pub fn new(locator: Arc<dyn TypeLocator>) -> Self {
        Self {
            phases: vec![
                Box::new(ParsePhase),
                Box::new(ReferencePhase::new(locator)),
                Box::new(DeclarePhase),
                Box::new(EmitPhase),
            ],
        }
    }

    pub fn phases(&self) -> impl Iterator<Item = &dyn Phase> {
        self.phases.iter().map(|p| p.as_ref())
    }

    pub fn run(&self, mut ctx: CompilationContext) -> Result<CompilationContext> {
        for phase in &self.phases {
            let _span = tracing::debug_span!("phase", name = phase.name()).entered();
            phase.run(&mut ctx)?;
            tracing::debug!(
                errors = ctx.error_count(),
                warnings = ctx.warning_count(),
                "phase complete"
            );
        }
        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{options::CompilerOptions, references::LogicalLocator};

    #[test]
    fn test_phase_order() {
        let pipeline = Pipeline::new(Arc::new(LogicalLocator));
        let names: Vec<_> = pipeline.phases().map(|p| p.info().name).collect();
        assert_eq!(names, vec!["parse", "references", "declare", "emit"]);
    }

    #[test]
    fn test_run_in_memory() {
        let pipeline = Pipeline::new(Arc::new(LogicalLocator));
        let ctx = CompilationContext::new(
            Arc::new(CompilerOptions::default()),
            vec!["namespace test { public class TestClass; }".to_string()],
            None,
        );
        let ctx = pipeline.run(ctx).unwrap();
        assert!(!ctx.has_errors(), "{:?}", ctx.diagnostics);
        let module = ctx.module.unwrap();
        assert!(module.find_type("test.TestClass").is_some());
        assert_eq!(module.references.len(), 4);
    }
}
