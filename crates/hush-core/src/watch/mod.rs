//! Watch-session state machine.

mod hooks;
mod session;

pub use hooks::{NoopHooks, WatchHooks};
pub use session::{
    CycleSummary, StatusSignal, WatchPhase, WatchReporter, WatchSession, WatchState,
    WatchStatusCodes,
};
