//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::sync::Arc;
use std::time::Duration;

use crate::model::{EditorId, ProjectId};
use crate::panel::DisplayRow;
use crate::syntax::SyntaxTree;

/// Commands returned by update functions
#[derive(Debug, Clone, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Arm the editor's one-shot debounce timer
    /// After delay, sends Msg::Cursor(DebounceElapsed)
    ScheduleTimer { editor: EditorId, delay: Duration },
    /// Run scope resolution on the worker
    /// Sends Msg::Cursor(ResolveCompleted) or Msg::Cursor(ResolveFailed)
    RunResolve {
        editor: EditorId,
        revision: u64,
        tree: Arc<SyntaxTree>,
        offset: usize,
    },
    /// Replace the rows of a project's list view
    SetRows {
        project: ProjectId,
        rows: Vec<DisplayRow>,
    },
    /// Move an editor's caret and scroll it into view
    MoveCaret { editor: EditorId, offset: usize },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Flatten batches into a list of leaf commands (for tests and logging)
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            cmd => vec![cmd],
        }
    }
}
