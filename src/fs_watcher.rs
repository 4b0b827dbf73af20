//! File system watching for the CLI host's `--watch` mode
//!
//! Uses the `notify` crate with debouncing to detect saves of a single spec
//! file. Editors replace files on save, so the parent directory is watched
//! and events are filtered down to the file itself.

use notify_debouncer_mini::{new_debouncer, DebouncedEventKind, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use crate::error::Result;

/// Debounced watcher for one file
pub struct FileWatcher {
    /// The debouncer handles watching and event coalescing
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    /// Receiver for debounced events
    rx: Receiver<std::result::Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>>,
    /// File being watched
    path: PathBuf,
}

impl FileWatcher {
    /// Start watching `path`
    ///
    /// Events are debounced with a 200ms delay to coalesce the write bursts
    /// editors produce on save.
    pub fn new(path: &Path) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let path = path.canonicalize()?;
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_else(|| path.clone());

        let mut debouncer = new_debouncer(Duration::from_millis(200), tx)?;
        debouncer
            .watcher()
            .watch(&dir, notify::RecursiveMode::NonRecursive)?;

        tracing::info!("Started file watcher for: {}", path.display());

        Ok(Self {
            _debouncer: debouncer,
            rx,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Poll for pending changes to the watched file (non-blocking)
    pub fn poll_changed(&self) -> bool {
        let mut changed = false;

        // Drain all pending events from the channel
        while let Ok(result) = self.rx.try_recv() {
            match result {
                Ok(events) => {
                    changed |= events.iter().any(|event| {
                        !matches!(event.kind, DebouncedEventKind::AnyContinuous)
                            && self.is_watched(&event.path)
                    });
                }
                Err(e) => {
                    tracing::warn!("File watcher error: {:?}", e);
                }
            }
        }

        if changed {
            tracing::debug!("File watcher detected change in {}", self.path.display());
        }
        changed
    }

    fn is_watched(&self, path: &Path) -> bool {
        path == self.path || path.canonicalize().is_ok_and(|p| p == self.path)
    }
}
