use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use cscribe_syntax::{CodeSaver, tree::CompilationUnit};

use crate::{
    diagnostic::Severity,
    error::{Error, Result},
    options::CompilerOptions,
    pipeline::{CompilationContext, Pipeline},
    references::{LogicalLocator, TypeLocator},
    result::{CompileResult, OutputRow},
};

/// Compiles source fragments into a module and a filtered diagnostic report.
///
/// Options and the type locator are read-only after construction, so a
/// `Compiler` can be cloned and used from concurrent tasks. Each call runs
/// as one blocking unit on the tokio blocking pool.
///
/// ```no_run
/// # async fn demo() -> cscribe_compiler::Result<()> {
/// use cscribe_compiler::Compiler;
///
/// let compiler = Compiler::new();
/// let result = compiler
///     .compile_source_in_memory(["namespace test { public class TestClass; }"])
///     .await?;
/// assert!(result.success());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Compiler {
    options: Arc<CompilerOptions>,
    locator: Arc<dyn TypeLocator>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self::with_options(CompilerOptions::default())
    }

    /// Default profile plus explicit library references.
    pub fn with_references<P: Into<PathBuf>>(references: impl IntoIterator<Item = P>) -> Self {
        Self::with_options(CompilerOptions::default().with_references(references))
    }

    pub fn with_options(options: CompilerOptions) -> Self {
        Self {
            options: Arc::new(options),
            locator: Arc::new(LogicalLocator),
        }
    }

    pub fn with_locator(mut self, locator: impl TypeLocator + 'static) -> Self {
        self.locator = Arc::new(locator);
        self
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Compile without writing anything; only success and diagnostics are
    /// reported.
    pub async fn compile_source_in_memory<S: Into<String>>(
        &self,
        sources: impl IntoIterator<Item = S>,
    ) -> Result<CompileResult> {
        self.compile_source(None, sources).await
    }

    pub async fn compile_files_in_memory<P: AsRef<Path>>(
        &self,
        paths: impl IntoIterator<Item = P>,
    ) -> Result<CompileResult> {
        let sources = read_sources(paths).await?;
        self.compile_source(None, sources).await
    }

    pub async fn compile_files<P: AsRef<Path>>(
        &self,
        output: impl AsRef<Path>,
        paths: impl IntoIterator<Item = P>,
    ) -> Result<CompileResult> {
        let sources = read_sources(paths).await?;
        self.compile_source(Some(output.as_ref()), sources).await
    }

    /// Render builder output with the default format and compile it in
    /// memory.
    pub async fn compile_units_in_memory(&self, units: &[CompilationUnit]) -> Result<CompileResult> {
        let saver = CodeSaver::new();
        let sources: Vec<String> = units.iter().map(|u| saver.save_code_as_string(u)).collect();
        self.compile_source(None, sources).await
    }

    /// Parse, bind, check and emit `sources` as one module.
    ///
    /// With `output` set the module image is written there; otherwise it is
    /// built and discarded. Only error-severity diagnostics are returned;
    /// the rest are logged.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`] if `sources` is empty, checked before any work
    /// is scheduled. Code that fails to compile is not an error.
    pub async fn compile_source<S: Into<String>>(
        &self,
        output: Option<&Path>,
        sources: impl IntoIterator<Item = S>,
    ) -> Result<CompileResult> {
        let sources: Vec<String> = sources.into_iter().map(Into::into).collect();
        if sources.is_empty() {
            return Err(Error::EmptyInput {
                parameter: "sources",
            });
        }

        let output = output.map(Path::to_path_buf);
        let options = Arc::clone(&self.options);
        let locator = Arc::clone(&self.locator);
        tracing::debug!(sources = sources.len(), output = ?output, "scheduling compilation");

        tokio::task::spawn_blocking(move || {
            let ctx = CompilationContext::new(options, sources, output);
            Pipeline::new(locator).run(ctx).map(into_result)
        })
        .await?
    }
}

async fn read_sources<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<Vec<String>> {
    let paths: Vec<PathBuf> = paths.into_iter().map(|p| p.as_ref().to_path_buf()).collect();
    if paths.is_empty() {
        return Err(Error::EmptyInput { parameter: "paths" });
    }

    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Error::io(&path, e))?;
        sources.push(text);
    }
    Ok(sources)
}

fn into_result(ctx: CompilationContext) -> CompileResult {
    let mut rows = Vec::new();
    for diagnostic in &ctx.diagnostics {
        if diagnostic.severity >= Severity::Error {
            rows.push(OutputRow::from(diagnostic));
        } else {
            tracing::warn!(code = diagnostic.id, "{diagnostic}");
        }
    }

    let success = ctx.module.is_some();
    let output_path = ctx
        .output
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    tracing::info!(success, errors = rows.len(), "compilation finished");

    CompileResult::new(output_path, success, rows)
}
