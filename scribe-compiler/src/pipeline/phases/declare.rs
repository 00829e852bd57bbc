use std::collections::HashMap;

use crate::{
    Result,
    diagnostic::{Diagnostic, codes},
    options::OutputKind,
    pipeline::{CompilationContext, Phase},
};

/// Checks that span source fragments: duplicate type definitions and, for
/// executables, the presence of an entry point.
pub struct DeclarePhase;

impl Phase for DeclarePhase {
    fn name(&self) -> &'static str {
        "declare"
    }

    fn description(&self) -> &'static str {
        "Check declarations across source fragments"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let mut seen: HashMap<String, bool> = HashMap::new();
        let mut duplicates = Vec::new();

        for tree in &ctx.trees {
            for symbol in tree.types.iter().filter(|t| !t.name.is_empty()) {
                match seen.get(&symbol.full_name()) {
                    Some(&partial) if partial && symbol.partial => {}
                    Some(_) => {
                        let namespace = symbol
                            .namespace
                            .clone()
                            .unwrap_or_else(|| "<global namespace>".to_string());
                        let message = format!(
                            "The namespace '{namespace}' already contains a definition for '{}'",
                            symbol.name
                        );
                        let location = tree.source.location(symbol.offset, symbol.name.len());
                        duplicates.push(Diagnostic::error(codes::DUPLICATE_TYPE, message).at(location));
                    }
                    None => {
                        seen.insert(symbol.full_name(), symbol.partial);
                    }
                }
            }
        }
        ctx.diagnostics.extend(duplicates);

        if ctx.options.output_kind == OutputKind::Console
            && !ctx
                .trees
                .iter()
                .flat_map(|t| &t.types)
                .any(|t| t.has_method("Main"))
        {
            ctx.add_diagnostic(Diagnostic::error(
                codes::NO_ENTRY_POINT,
                "Program does not contain a static 'Main' method suitable for an entry point",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        options::CompilerOptions,
        pipeline::ParsePhase,
    };

    fn declare(options: CompilerOptions, sources: &[&str]) -> Vec<&'static str> {
        let mut ctx = CompilationContext::new(
            Arc::new(options),
            sources.iter().map(|s| s.to_string()).collect(),
            None,
        );
        ParsePhase.run(&mut ctx).unwrap();
        DeclarePhase.run(&mut ctx).unwrap();
        ctx.diagnostics.iter().map(|d| d.id).collect()
    }

    #[test]
    fn test_duplicate_across_fragments() {
        let ids = declare(
            CompilerOptions::default(),
            &["namespace N { class A { } }", "namespace N { class A { } }"],
        );
        assert_eq!(ids, vec![codes::DUPLICATE_TYPE]);
    }

    #[test]
    fn test_partial_and_generic_types_are_distinct() {
        let ids = declare(
            CompilerOptions::default(),
            &[
                "partial class A { int x; }",
                "partial class A { int y; }",
                "class Box { } class Box<T> { }",
            ],
        );
        assert!(ids.is_empty(), "{ids:?}");
    }

    #[test]
    fn test_console_requires_entry_point() {
        let console = CompilerOptions::default().with_output_kind(OutputKind::Console);
        assert_eq!(
            declare(console.clone(), &["class A { }"]),
            vec![codes::NO_ENTRY_POINT]
        );
        assert!(declare(console, &["static class P { static void Main() { } }"]).is_empty());
    }
}
