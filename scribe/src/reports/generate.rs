//! Generate report data structures.

use std::path::PathBuf;

use super::{
    compile::CheckReport,
    output::{Output, Report},
};

/// Report data from generating one type.
#[derive(Debug)]
pub struct GenerateReport {
    /// Rendered source.
    pub code: String,
    /// Where the source was saved; printed instead when `None`.
    pub written: Option<PathBuf>,
    /// Result of compiling the generated source, when requested.
    pub check: Option<CheckReport>,
}

impl GenerateReport {
    /// Whether the generated source compiled, or was not checked.
    pub fn is_valid(&self) -> bool {
        self.check.as_ref().is_none_or(CheckReport::is_valid)
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.written {
            Some(path) => out.added_item(&path.display().to_string()),
            None => out.preformatted(self.code.trim_end()),
        }

        if let Some(check) = &self.check {
            out.newline();
            check.render(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use cscribe_compiler::CompileResult;

    use super::*;
    use crate::reports::{SourceFile, output::RecordingOutput};

    #[test]
    fn test_render_prints_code_when_not_written() {
        let report = GenerateReport {
            code: "public class A;\n".to_string(),
            written: None,
            check: None,
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(out.lines, vec!["public class A;"]);
        assert!(report.is_valid());
    }

    #[test]
    fn test_render_written_and_checked() {
        let report = GenerateReport {
            code: "public class A;\n".to_string(),
            written: Some(PathBuf::from("out/A.cs")),
            check: Some(CheckReport::new(
                vec![SourceFile::new("out/A.cs", "public class A;\n")],
                CompileResult::new("", true, Vec::new()),
            )),
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(out.lines, vec!["+ out/A.cs", "", "✓ out/A.cs compiled"]);
    }
}
