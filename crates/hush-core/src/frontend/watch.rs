//! Watch-mode compilation host.
//!
//! Each cycle re-reads the project configuration, rebuilds the program and
//! reports through the two [`WatchReporter`] slots: a start status, every
//! diagnostic, then a done status.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::pass::EmitPass;
use super::program::Program;
use super::project::ProjectConfig;
use crate::diagnostics::{DiagnosticRecord, codes};
use crate::watch::{WatchReporter, WatchStatusCodes};

/// Why a cycle is running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleTrigger {
    Initial,
    FilesChanged(Vec<PathBuf>),
}

pub struct WatchProgram {
    config_path: PathBuf,
    codes: WatchStatusCodes,
    passes: Vec<Box<dyn EmitPass>>,
}

impl WatchProgram {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            codes: WatchStatusCodes::default(),
            passes: Vec::new(),
        }
    }

    pub fn with_codes(mut self, codes: WatchStatusCodes) -> Self {
        self.codes = codes;
        self
    }

    pub fn with_pass(mut self, pass: impl EmitPass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Compile once and report. Returns the number of error diagnostics.
    pub fn run_cycle(&self, trigger: &CycleTrigger, reporter: &mut dyn WatchReporter) -> usize {
        let status = match trigger {
            CycleTrigger::Initial => DiagnosticRecord::message(
                self.codes.starting,
                "Starting compilation in watch mode...",
            ),
            CycleTrigger::FilesChanged(paths) => {
                debug!(changed = paths.len(), "recompiling after file change");
                DiagnosticRecord::message(
                    self.codes.file_change,
                    "File change detected. Starting incremental compilation...",
                )
            }
        };
        reporter.report_status(status);

        let errors = match ProjectConfig::load(&self.config_path) {
            Ok(project) => self.compile(project, reporter),
            Err(err) => {
                reporter.report_diagnostic(
                    DiagnosticRecord::error(codes::CONFIG, err.to_string())
                        .with_file(&self.config_path),
                );
                1
            }
        };

        reporter.report_status(DiagnosticRecord::message(
            self.codes.done,
            found_errors(errors),
        ));
        errors
    }

    fn compile(&self, project: ProjectConfig, reporter: &mut dyn WatchReporter) -> usize {
        let program = Program::build(project);
        let mut errors = 0;

        for diagnostic in program.pre_emit_diagnostics() {
            errors += usize::from(diagnostic.is_error());
            reporter.report_diagnostic(diagnostic.clone());
        }

        let passes: Vec<&dyn EmitPass> = self.passes.iter().map(|pass| &**pass).collect();
        let emit = program.emit(&passes);
        if !emit.emit_skipped {
            for diagnostic in emit.diagnostics {
                errors += usize::from(diagnostic.is_error());
                reporter.report_diagnostic(diagnostic);
            }
        }

        errors
    }
}

fn found_errors(count: usize) -> String {
    match count {
        1 => "Found 1 error. Watching for file changes.".to_string(),
        n => format!("Found {n} errors. Watching for file changes."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        statuses: Vec<DiagnosticRecord>,
        diagnostics: Vec<DiagnosticRecord>,
    }

    impl WatchReporter for Recorder {
        fn report_diagnostic(&mut self, diagnostic: DiagnosticRecord) {
            self.diagnostics.push(diagnostic);
        }

        fn report_status(&mut self, status: DiagnosticRecord) {
            self.statuses.push(status);
        }
    }

    #[test]
    fn test_missing_config_reports_and_finishes_cycle() {
        let dir = tempfile::TempDir::new().unwrap();
        let program = WatchProgram::new(dir.path().join("tsconfig.json"));
        let mut recorder = Recorder::default();

        let errors = program.run_cycle(&CycleTrigger::Initial, &mut recorder);

        assert_eq!(errors, 1);
        let status_codes: Vec<_> = recorder.statuses.iter().map(|s| s.code).collect();
        assert_eq!(status_codes, vec![codes::WATCH_STARTING, codes::WATCH_DONE]);
        assert_eq!(
            recorder.statuses[1].message,
            "Found 1 error. Watching for file changes."
        );
        assert_eq!(recorder.diagnostics.len(), 1);
    }

    #[test]
    fn test_file_change_uses_change_code() {
        let dir = tempfile::TempDir::new().unwrap();
        let program = WatchProgram::new(dir.path().join("tsconfig.json"));
        let mut recorder = Recorder::default();

        program.run_cycle(
            &CycleTrigger::FilesChanged(vec![dir.path().join("a.ts")]),
            &mut recorder,
        );

        assert_eq!(recorder.statuses[0].code, codes::WATCH_FILE_CHANGE);
    }

    #[test]
    fn test_found_errors_text() {
        assert_eq!(found_errors(0), "Found 0 errors. Watching for file changes.");
        assert_eq!(found_errors(2), "Found 2 errors. Watching for file changes.");
    }
}
