//! Check and build operations - compile source files into a report.

use std::path::{Path, PathBuf};

use cscribe_compiler::{Compiler, Module};
use eyre::{Context, Result};

use crate::reports::{BuildReport, CheckReport, SourceFile};

/// Compile `paths` without writing a module.
pub async fn check(compiler: &Compiler, paths: &[PathBuf]) -> Result<CheckReport> {
    let sources = read_sources(paths).await?;
    check_sources(compiler, sources).await
}

/// Compile already-loaded sources without writing a module.
pub async fn check_sources(compiler: &Compiler, sources: Vec<SourceFile>) -> Result<CheckReport> {
    let result = compiler
        .compile_source_in_memory(sources.iter().map(|s| s.text.clone()))
        .await
        .wrap_err("Compilation failed")?;
    Ok(CheckReport::new(sources, result))
}

/// Compile `paths` and write the module to `output`.
///
/// On success the written module is read back so the report can list what
/// it declares.
pub async fn build(compiler: &Compiler, output: &Path, paths: &[PathBuf]) -> Result<BuildReport> {
    let sources = read_sources(paths).await?;
    let result = compiler
        .compile_source(Some(output), sources.iter().map(|s| s.text.clone()))
        .await
        .wrap_err("Compilation failed")?;

    let module = if result.success() {
        let module = Module::load(output)
            .wrap_err_with(|| format!("failed to read back '{}'", output.display()))?;
        Some(module)
    } else {
        None
    };

    Ok(BuildReport {
        output: output.to_path_buf(),
        check: CheckReport::new(sources, result),
        module,
    })
}

async fn read_sources(paths: &[PathBuf]) -> Result<Vec<SourceFile>> {
    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let text = tokio::fs::read_to_string(path)
            .await
            .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
        sources.push(SourceFile::new(path.display().to_string(), text));
    }
    Ok(sources)
}
