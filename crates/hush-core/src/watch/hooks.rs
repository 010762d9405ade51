use super::session::CycleSummary;

/// Lifecycle callbacks for a watch session. Every hook defaults to a no-op.
pub trait WatchHooks {
    /// Runs after the buffer is reset, before the start status is shown.
    fn on_cycle_start(&mut self) {}

    /// Runs after the cycle summary has been printed.
    fn on_cycle_done(&mut self, _summary: &CycleSummary) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl WatchHooks for NoopHooks {}
