//! Watch-mode diagnostic buffering.
//!
//! A [`WatchSession`] is driven by the two callbacks of a watch host:
//! diagnostics and status records. Status codes decide the phase:
//!
//! ```text
//! Idle --start--> Compiling --done--> Done --start--> Compiling ...
//! ```
//!
//! On start the buffer is replaced with an empty one and the status is shown
//! at once. On done the status is appended, the whole buffer is flushed
//! through the aggregator and the suppressed count is reported.

use std::io::Write;

use tracing::trace;

use super::hooks::{NoopHooks, WatchHooks};
use crate::diagnostics::{DiagnosticAggregator, DiagnosticRecord, codes};

/// Status codes that drive phase transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchStatusCodes {
    pub starting: u32,
    pub file_change: u32,
    pub done: u32,
}

impl Default for WatchStatusCodes {
    fn default() -> Self {
        Self {
            starting: codes::WATCH_STARTING,
            file_change: codes::WATCH_FILE_CHANGE,
            done: codes::WATCH_DONE,
        }
    }
}

impl WatchStatusCodes {
    pub fn signal(&self, code: u32) -> StatusSignal {
        if code == self.starting || code == self.file_change {
            StatusSignal::CycleStart
        } else if code == self.done {
            StatusSignal::CycleDone
        } else {
            StatusSignal::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSignal {
    CycleStart,
    CycleDone,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchPhase {
    #[default]
    Idle,
    Compiling,
    Done,
}

#[derive(Debug, Default)]
pub struct WatchState {
    pub phase: WatchPhase,
    pub buffer: Vec<DiagnosticRecord>,
}

/// What a finished cycle flushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleSummary {
    /// Buffered diagnostics including the done status, in arrival order
    pub diagnostics: Vec<DiagnosticRecord>,
    pub suppressed: usize,
}

impl CycleSummary {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }
}

/// Callback slots of a watch host.
pub trait WatchReporter {
    fn report_diagnostic(&mut self, diagnostic: DiagnosticRecord);
    fn report_status(&mut self, status: DiagnosticRecord);
}

pub struct WatchSession<W: Write, H: WatchHooks = NoopHooks> {
    state: WatchState,
    codes: WatchStatusCodes,
    aggregator: DiagnosticAggregator<W>,
    hooks: H,
}

impl<W: Write> WatchSession<W, NoopHooks> {
    pub fn new(aggregator: DiagnosticAggregator<W>) -> Self {
        Self {
            state: WatchState::default(),
            codes: WatchStatusCodes::default(),
            aggregator,
            hooks: NoopHooks,
        }
    }
}

impl<W: Write, H: WatchHooks> WatchSession<W, H> {
    pub fn with_codes(mut self, codes: WatchStatusCodes) -> Self {
        self.codes = codes;
        self
    }

    pub fn with_hooks<H2: WatchHooks>(self, hooks: H2) -> WatchSession<W, H2> {
        WatchSession {
            state: self.state,
            codes: self.codes,
            aggregator: self.aggregator,
            hooks,
        }
    }

    pub fn phase(&self) -> WatchPhase {
        self.state.phase
    }

    pub fn buffered(&self) -> &[DiagnosticRecord] {
        &self.state.buffer
    }

    pub fn codes(&self) -> &WatchStatusCodes {
        &self.codes
    }

    pub fn aggregator(&self) -> &DiagnosticAggregator<W> {
        &self.aggregator
    }

    pub fn aggregator_mut(&mut self) -> &mut DiagnosticAggregator<W> {
        &mut self.aggregator
    }

    pub fn into_aggregator(self) -> DiagnosticAggregator<W> {
        self.aggregator
    }

    pub fn on_diagnostic(&mut self, diagnostic: DiagnosticRecord) {
        self.state.buffer.push(diagnostic);
    }

    /// Feed a status record. Returns the flushed cycle on a done signal.
    pub fn on_status(&mut self, status: DiagnosticRecord) -> Option<CycleSummary> {
        match self.codes.signal(status.code) {
            StatusSignal::CycleStart => {
                self.state.buffer = Vec::new();
                self.hooks.on_cycle_start();
                self.aggregator.summarize(&status);
                self.state.phase = WatchPhase::Compiling;
                None
            }
            StatusSignal::CycleDone => {
                self.state.buffer.push(status);
                self.aggregator.summarize(&self.state.buffer);
                let suppressed = self.state.buffer.len();
                self.aggregator.report_suppression(suppressed);
                self.state.phase = WatchPhase::Done;
                self.aggregator.info("Watching for file changes...");

                let summary = CycleSummary {
                    diagnostics: self.state.buffer.clone(),
                    suppressed,
                };
                self.hooks.on_cycle_done(&summary);
                Some(summary)
            }
            StatusSignal::Other => {
                trace!(code = status.code, "ignoring watch status");
                None
            }
        }
    }
}

impl<W: Write, H: WatchHooks> WatchReporter for WatchSession<W, H> {
    fn report_diagnostic(&mut self, diagnostic: DiagnosticRecord) {
        self.on_diagnostic(diagnostic);
    }

    fn report_status(&mut self, status: DiagnosticRecord) {
        self.on_status(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::FormatOptions;

    fn session() -> WatchSession<Vec<u8>> {
        WatchSession::new(DiagnosticAggregator::new(Vec::new(), FormatOptions::plain()))
    }

    fn start() -> DiagnosticRecord {
        DiagnosticRecord::message(codes::WATCH_STARTING, "Starting compilation in watch mode...")
    }

    fn done() -> DiagnosticRecord {
        DiagnosticRecord::message(codes::WATCH_DONE, "Found 0 errors. Watching for file changes.")
    }

    #[test]
    fn test_phase_transitions() {
        let mut session = session();
        assert_eq!(session.phase(), WatchPhase::Idle);
        assert!(session.on_status(start()).is_none());
        assert_eq!(session.phase(), WatchPhase::Compiling);
        assert!(session.on_status(done()).is_some());
        assert_eq!(session.phase(), WatchPhase::Done);
    }

    #[test]
    fn test_start_discards_previous_buffer() {
        let mut session = session();
        session.on_diagnostic(DiagnosticRecord::error(1, "stale"));
        session.on_status(start());
        assert!(session.buffered().is_empty());
    }

    #[test]
    fn test_unknown_status_is_ignored() {
        let mut session = session();
        session.on_status(start());
        assert!(session.on_status(DiagnosticRecord::message(6193, "other")).is_none());
        assert_eq!(session.phase(), WatchPhase::Compiling);
        assert!(session.buffered().is_empty());
    }

    #[test]
    fn test_custom_codes() {
        let mut session = session().with_codes(WatchStatusCodes {
            starting: 1,
            file_change: 2,
            done: 3,
        });
        session.on_status(DiagnosticRecord::message(2, "go"));
        assert_eq!(session.phase(), WatchPhase::Compiling);
        let summary = session.on_status(DiagnosticRecord::message(3, "stop")).unwrap();
        assert_eq!(summary.suppressed, 1);
    }

    #[test]
    fn test_done_flushes_and_reports() {
        let mut session = session();
        session.on_status(start());
        session.on_diagnostic(DiagnosticRecord::error(1000, "bad"));
        let summary = session.on_status(done()).unwrap();
        assert_eq!(summary.suppressed, 2);
        assert_eq!(summary.error_count(), 1);

        let out = String::from_utf8(session.into_aggregator().into_inner()).unwrap();
        assert_eq!(
            out,
            "message H6031: Starting compilation in watch mode...\n\
             error H1000: bad\n\
             message H6194: Found 0 errors. Watching for file changes.\n\
             warning Suppressed errors: 2\n\
             info Compilation completed successfully.\n\
             info Watching for file changes...\n"
        );
    }
}
