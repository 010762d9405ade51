//! Watch mode.
//!
//! Owns the [`WatchSession`] and the [`WatchProgram`] in one loop: file
//! changes arrive on a channel, are drained into a single batch and trigger
//! one compilation cycle. Ctrl+C stops the loop.

use crate::config::HushConfig;
use crate::error::Result;
use crate::ui;
use crate::watcher::{FileWatcher, WatchFilter};
use console::Term;
use hush_core::frontend::{CycleTrigger, WatchProgram};
use hush_core::{DiagnosticAggregator, FormatOptions, WatchHooks, WatchSession};
use std::path::PathBuf;
use tokio::signal;

const DEBOUNCE_MS: u64 = 100;

/// Clears the terminal before every cycle.
pub struct ClearScreenHooks {
    term: Term,
}

impl ClearScreenHooks {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for ClearScreenHooks {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchHooks for ClearScreenHooks {
    fn on_cycle_start(&mut self) {
        if !self.term.is_term() {
            return;
        }
        if let Err(err) = self.term.clear_screen() {
            tracing::debug!("failed to clear screen: {err}");
        }
    }
}

/// Execute watch mode.
///
/// # Process Flow
///
/// 1. Load the project and build the rewrite pass
/// 2. Start the file watcher (output and dependency folders ignored)
/// 3. Run the initial cycle
/// 4. Recompile on each batch of changes until Ctrl+C
pub async fn execute(config: HushConfig, color: bool) -> Result<()> {
    let (project, pass) = super::prepare(&config)?;

    let aggregator = DiagnosticAggregator::stdout(FormatOptions::new(color));

    let mut filter = WatchFilter::new(project.root.clone());
    if let Some(out_dir) = &project.options.out_dir {
        filter = filter.ignore_dir(out_dir);
    }
    let (watcher, mut changes) = FileWatcher::new(filter, DEBOUNCE_MS)?;
    tracing::debug!(root = %watcher.root().display(), "watching for changes");

    let program = WatchProgram::new(&config.project).with_pass(pass);
    let mut session = WatchSession::new(aggregator).with_hooks(ClearScreenHooks::new());

    program.run_cycle(&CycleTrigger::Initial, &mut session);

    loop {
        tokio::select! {
            Some(change) = changes.recv() => {
                let mut changed = vec![change.into_path()];
                while let Ok(more) = changes.try_recv() {
                    changed.push(more.into_path());
                }
                program.run_cycle(&CycleTrigger::FilesChanged(dedup(changed)), &mut session);
            }

            _ = signal::ctrl_c() => {
                break;
            }
        }
    }

    ui::success("Stopped watching");
    Ok(())
}

fn dedup(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort();
    paths.dedup();
    paths
}
