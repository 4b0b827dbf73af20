//! Watched editors and their identifiers

use std::path::PathBuf;

use crate::debounce::{DebounceConfig, DebounceScheduler};
use crate::syntax::SpecDocument;

/// Unique identifier for an editor view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EditorId(pub u64);

/// Unique identifier for an open project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(pub u64);

/// What the host reports when an editor is created
#[derive(Debug, Clone)]
pub struct EditorInfo {
    pub id: EditorId,
    pub project: ProjectId,
    pub path: PathBuf,
    pub text: String,
}

/// An editor showing a spec file, with its cursor watch
#[derive(Debug)]
pub struct WatchedEditor {
    pub id: EditorId,
    pub project: ProjectId,
    pub document: SpecDocument,
    /// Last caret offset reported by the host
    pub caret: usize,
    pub watch: DebounceScheduler,
}

impl WatchedEditor {
    pub fn new(id: EditorId, project: ProjectId, document: SpecDocument, config: DebounceConfig) -> Self {
        Self {
            id,
            project,
            document,
            caret: 0,
            watch: DebounceScheduler::new(config),
        }
    }

    /// Caret position moved off whitespace, ready for resolution
    pub fn anchored_caret(&self) -> usize {
        self.document.anchor_offset(self.caret)
    }
}
