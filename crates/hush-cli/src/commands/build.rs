//! One-shot compilation.

use crate::config::HushConfig;
use crate::error::Result;
use hush_core::{DiagnosticAggregator, FormatOptions, compile_once};

/// Execute a single compilation.
///
/// Diagnostics never make this fail: they are printed, counted and
/// summarized on stdout. Only configuration and I/O problems return an error.
pub fn execute(config: HushConfig, color: bool) -> Result<()> {
    let (project, pass) = super::prepare(&config)?;

    let mut aggregator = DiagnosticAggregator::stdout(FormatOptions::new(color));

    let outcome = compile_once(project, &[&pass], &mut aggregator);
    tracing::debug!(
        suppressed = outcome.suppressed,
        emitted = outcome.emitted_files.len(),
        skipped = outcome.emit_skipped,
        "compilation finished"
    );

    Ok(())
}
