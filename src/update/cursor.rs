//! Cursor watch update handlers
//!
//! Feeds caret events and timer wakeups into each editor's debounce state
//! and turns completed resolutions into panel rows.

use crate::commands::Cmd;
use crate::debounce::{MoveDecision, TimerDecision};
use crate::messages::CursorMsg;
use crate::model::{AppModel, WatchedEditor};
use crate::panel::to_rows;

/// Handle cursor watch messages
pub fn update_cursor(model: &mut AppModel, msg: CursorMsg) -> Option<Cmd> {
    match msg {
        CursorMsg::Moved { editor, offset, at } => {
            let Some(watched) = model.editors.get_mut(&editor) else {
                tracing::trace!("Ignoring caret move in unwatched editor {}", editor.0);
                return None;
            };
            watched.caret = offset.min(watched.document.len_bytes());
            cursor_moved(watched, at)
        }

        CursorMsg::DebounceElapsed { editor, at } => {
            let Some(watched) = model.editors.get_mut(&editor) else {
                tracing::debug!("Editor {} released before its timer fired", editor.0);
                return None;
            };
            match watched.watch.on_timer(at) {
                TimerDecision::Fire => Some(run_resolve(watched)),
                TimerDecision::Rearm(delay) => Some(Cmd::ScheduleTimer { editor, delay }),
                TimerDecision::Deferred => {
                    tracing::trace!("Editor {} timer deferred behind running resolve", editor.0);
                    None
                }
                TimerDecision::Suppressed | TimerDecision::Idle => None,
            }
        }

        CursorMsg::ResolveCompleted {
            editor,
            revision,
            context,
            at,
        } => {
            let Some(watched) = model.editors.get_mut(&editor) else {
                tracing::debug!("Editor {} released, discarding resolution", editor.0);
                return None;
            };
            let follow_up = watched.watch.finish(at).then(|| run_resolve(watched));

            // Skip if the document has been edited since the resolve started
            if watched.document.revision != revision {
                tracing::debug!(
                    "Discarding stale resolution: doc revision {} != result revision {}",
                    watched.document.revision,
                    revision
                );
                return follow_up;
            }

            let project = watched.project;
            let Some(panel) = model.panels.get_mut(&project) else {
                tracing::warn!("No panel for project {}, dropping rows", project.0);
                return follow_up;
            };
            let rows = to_rows(&context);
            panel.set_rows(editor, rows.clone());
            tracing::debug!("Applied {} rows from editor {} to project {}", rows.len(), editor.0, project.0);

            combine(Some(Cmd::SetRows { project, rows }), follow_up)
        }

        CursorMsg::ResolveFailed { editor, reason, at } => {
            tracing::warn!("Resolution failed for editor {}: {}", editor.0, reason);
            let watched = model.editors.get_mut(&editor)?;
            watched.watch.finish(at).then(|| run_resolve(watched))
        }
    }
}

/// Run a caret event through the editor's debounce state
pub(super) fn cursor_moved(watched: &mut WatchedEditor, at: std::time::Instant) -> Option<Cmd> {
    match watched.watch.on_cursor_moved(at) {
        MoveDecision::RunNow => Some(run_resolve(watched)),
        MoveDecision::Schedule(delay) => Some(Cmd::ScheduleTimer {
            editor: watched.id,
            delay,
        }),
        MoveDecision::Coalesced | MoveDecision::Suppressed => None,
    }
}

/// Snapshot the tree and anchored caret for the worker
fn run_resolve(watched: &WatchedEditor) -> Cmd {
    Cmd::RunResolve {
        editor: watched.id,
        revision: watched.document.revision,
        tree: watched.document.tree(),
        offset: watched.anchored_caret(),
    }
}

fn combine(first: Option<Cmd>, second: Option<Cmd>) -> Option<Cmd> {
    match (first, second) {
        (Some(a), Some(b)) => Some(Cmd::batch(vec![a, b])),
        (a, b) => a.or(b),
    }
}
