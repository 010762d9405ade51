//! One-shot compilation with suppressed diagnostics.

use std::io::Write;
use std::path::PathBuf;

use crate::diagnostics::DiagnosticAggregator;
use crate::frontend::{CompilerOptions, EmitPass, Program, ProjectConfig};

/// What a one-shot compilation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOutcome {
    /// Diagnostics printed and counted as suppressed
    pub suppressed: usize,
    pub emit_skipped: bool,
    pub emitted_files: Vec<PathBuf>,
}

/// Build, emit, then print every diagnostic and the suppression summary.
///
/// Emit diagnostics are only counted when emission actually happened.
pub fn compile_once<W: Write>(
    project: ProjectConfig,
    passes: &[&dyn EmitPass],
    aggregator: &mut DiagnosticAggregator<W>,
) -> CompileOutcome {
    let program = Program::build(project);
    let emit = program.emit(passes);

    let mut diagnostics = program.pre_emit_diagnostics().to_vec();
    if !emit.emit_skipped {
        diagnostics.extend(emit.diagnostics);
    }

    let suppressed = aggregator.summarize(&diagnostics);
    aggregator.report_suppression(suppressed);

    CompileOutcome {
        suppressed,
        emit_skipped: emit.emit_skipped,
        emitted_files: emit.emitted_files,
    }
}

/// Warning shown when `noEmitOnError` will still block output.
pub fn emit_blocked_warning(options: &CompilerOptions) -> Option<&'static str> {
    options.no_emit_on_error.then_some(
        "No files will be emitted even if errors are suppressed when \"compilerOptions.noEmitOnError: true\"",
    )
}
