//! File system watcher feeding watch-mode recompilation.
//!
//! Watches the project directory recursively and forwards changes to inputs
//! (`.ts`, `.tsx`, `.mts`, `.cts`) and configuration (`.json`, `hush.toml`)
//! through a tokio channel. Emitted output must never trigger a cycle, so the
//! output directory, dependency folders, hidden paths and declaration files
//! are ignored.

use crate::error::{CliError, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

const WATCHED_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "json"];
const IGNORED_DIRS: &[&str] = &["node_modules", "bower_components", "jspm_packages"];

/// File change event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Modified(PathBuf),
    Created(PathBuf),
    Removed(PathBuf),
}

impl FileChange {
    /// Get the path affected by this change.
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }

    pub fn into_path(self) -> PathBuf {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }
}

/// What the watcher skips besides hidden paths and dependency folders.
#[derive(Debug, Clone, Default)]
pub struct WatchFilter {
    root: PathBuf,
    ignored: Vec<PathBuf>,
}

impl WatchFilter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignored: Vec::new(),
        }
    }

    /// Ignore everything below `dir` (typically `outDir`).
    pub fn ignore_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.ignored.push(dir.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check if a path should be ignored.
    pub fn should_ignore(&self, path: &Path) -> bool {
        let Ok(rel_path) = path.strip_prefix(&self.root) else {
            return true;
        };

        if self.ignored.iter().any(|dir| path.starts_with(dir)) {
            return true;
        }

        for component in rel_path.components() {
            if let Some(name) = component.as_os_str().to_str() {
                if name.starts_with('.') && name != "." && name != ".." {
                    return true;
                }
                if IGNORED_DIRS.contains(&name) {
                    return true;
                }
            }
        }

        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            return true;
        };
        if file_name == crate::config::CONFIG_FILE_NAME {
            return false;
        }
        if file_name.contains(".d.") {
            return true;
        }

        !path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| WATCHED_EXTENSIONS.contains(&ext))
    }
}

/// Recursive file watcher with per-path debouncing.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl FileWatcher {
    /// Start watching `filter.root()`.
    ///
    /// Returns the watcher (dropping it stops watching) and the receiving end
    /// of the change channel.
    pub fn new(filter: WatchFilter, debounce_ms: u64) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        let root = filter.root().to_path_buf();
        if !root.exists() {
            return Err(CliError::FileNotFound(root));
        }

        let (tx, rx) = mpsc::channel(100);
        let debounce = Duration::from_millis(debounce_ms);
        let mut last_event: Option<(PathBuf, Instant)> = None;

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!("file watcher error: {err}");
                    return;
                }
            };

            for path in &event.paths {
                if filter.should_ignore(path) {
                    continue;
                }

                let now = Instant::now();
                if let Some((last_path, last_time)) = &last_event {
                    if last_path == path && now.duration_since(*last_time) < debounce {
                        continue;
                    }
                }
                last_event = Some((path.clone(), now));

                let change = match event.kind {
                    EventKind::Create(_) => FileChange::Created(path.clone()),
                    EventKind::Modify(_) => FileChange::Modified(path.clone()),
                    EventKind::Remove(_) => FileChange::Removed(path.clone()),
                    _ => continue,
                };

                tracing::trace!(path = %path.display(), "file change");
                if tx.blocking_send(change).is_err() {
                    return;
                }
            }
        })?;

        watcher.watch(&root, RecursiveMode::Recursive)?;

        Ok((
            Self {
                _watcher: watcher,
                root,
            },
            rx,
        ))
    }

    /// Get the root directory being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }
}
