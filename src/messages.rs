//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types. Messages that depend
//! on time carry the instant they were observed so update stays deterministic.

use std::time::Instant;

use crate::model::{EditorId, EditorInfo, ProjectId};
use crate::scope::ResolvedContext;

/// Cursor watch messages
#[derive(Debug, Clone)]
pub enum CursorMsg {
    /// The host reported a caret move
    Moved {
        editor: EditorId,
        offset: usize,
        at: Instant,
    },
    /// The editor's debounce timer went off
    DebounceElapsed { editor: EditorId, at: Instant },
    /// A resolution finished on the worker
    ResolveCompleted {
        editor: EditorId,
        revision: u64,
        context: ResolvedContext,
        at: Instant,
    },
    /// A resolution panicked on the worker
    ResolveFailed {
        editor: EditorId,
        reason: String,
        at: Instant,
    },
}

/// Scope panel messages
#[derive(Debug, Clone)]
pub enum PanelMsg {
    /// The user activated a row (click or enter)
    RowActivated {
        project: ProjectId,
        index: usize,
        at: Instant,
    },
}

/// Document content messages
#[derive(Debug, Clone)]
pub enum DocumentMsg {
    /// The editor's text changed; the document is re-parsed
    Changed {
        editor: EditorId,
        text: String,
        at: Instant,
    },
}

/// Host lifecycle messages
#[derive(Debug, Clone)]
pub enum LifecycleMsg {
    ProjectOpened(ProjectId),
    ProjectClosed(ProjectId),
    EditorCreated(EditorInfo),
    EditorReleased(EditorId),
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Cursor(CursorMsg),
    Panel(PanelMsg),
    Document(DocumentMsg),
    Lifecycle(LifecycleMsg),
}
