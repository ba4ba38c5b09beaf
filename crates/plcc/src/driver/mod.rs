//! Compilation driver: file handling and pipeline orchestration

use crate::common::{CompileResult, DiagnosticReporter};
use crate::frontend::{CompileContext, FrontendConfig, PlcFrontend, Program};
use log::info;
use std::fs;
use std::path::Path;

/// Runs the frontend over source files, owning the diagnostic reporter
pub struct Pipeline {
    frontend: PlcFrontend,
    reporter: DiagnosticReporter,
    config: FrontendConfig,
}

impl Pipeline {
    pub fn new(config: FrontendConfig) -> Self {
        Self::with_reporter(config, DiagnosticReporter::new())
    }

    pub fn with_reporter(config: FrontendConfig, reporter: DiagnosticReporter) -> Self {
        Self {
            frontend: PlcFrontend::new(),
            reporter,
            config,
        }
    }

    pub fn config(&self) -> &FrontendConfig {
        &self.config
    }

    /// Read and type check the file at `path`
    pub fn check_file(&mut self, path: &Path) -> CompileResult<Program> {
        let source = fs::read_to_string(path)?;
        self.check_source(&path.display().to_string(), &source)
    }

    /// Type check in-memory source registered under `filename`
    pub fn check_source(&mut self, filename: &str, source: &str) -> CompileResult<Program> {
        let file_id = self.reporter.add_file(filename, source);
        let ctx = CompileContext::new(filename.to_string(), file_id, &self.reporter);

        let program = self.frontend.check(source, &ctx, &self.config)?;
        info!(
            "{}: program '{}' checked ({} declarations)",
            filename,
            program.name,
            program.decls.len()
        );
        Ok(program)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(FrontendConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codespan_reporting::term::termcolor::ColorChoice;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn pipeline() -> Pipeline {
        Pipeline::with_reporter(
            FrontendConfig::default(),
            DiagnosticReporter::with_color(ColorChoice::Never),
        )
    }

    #[test]
    fn test_check_source() {
        let program = pipeline()
            .check_source("blur.plc", "image blur(image[8, 8] im) ^ im / 2;")
            .unwrap();
        assert_eq!(program.name, "blur");
        assert_eq!(program.decls.len(), 1);
    }

    #[test]
    fn test_check_file() {
        let path = std::env::temp_dir().join(format!("plcc-driver-{}.plc", std::process::id()));
        fs::write(&path, "void main() write \"hi\" -> console;").unwrap();

        let result = pipeline().check_file(&path);
        fs::remove_file(&path).unwrap();
        assert_eq!(result.unwrap().name, "main");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = pipeline()
            .check_file(&PathBuf::from("/nonexistent/dir/prog.plc"))
            .unwrap_err();
        assert!(matches!(err, crate::common::CompileError::Io(_)));
    }
}
