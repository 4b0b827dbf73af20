//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod cursor;
mod document;
mod lifecycle;
mod panel;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::AppModel;

pub use cursor::update_cursor;
pub use document::update_document;
pub use lifecycle::update_lifecycle;
pub use panel::update_panel;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
#[inline]
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        let _span = tracing::debug_span!("update", msg = msg_name(&msg)).entered();
        update_inner(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

fn update_inner(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Cursor(m) => update_cursor(model, m),
        Msg::Panel(m) => update_panel(model, m),
        Msg::Document(m) => update_document(model, m),
        Msg::Lifecycle(m) => update_lifecycle(model, m),
    }
}

#[cfg(debug_assertions)]
fn msg_name(msg: &Msg) -> &'static str {
    use crate::messages::{CursorMsg, DocumentMsg, LifecycleMsg, PanelMsg};

    match msg {
        Msg::Cursor(CursorMsg::Moved { .. }) => "Cursor::Moved",
        Msg::Cursor(CursorMsg::DebounceElapsed { .. }) => "Cursor::DebounceElapsed",
        Msg::Cursor(CursorMsg::ResolveCompleted { .. }) => "Cursor::ResolveCompleted",
        Msg::Cursor(CursorMsg::ResolveFailed { .. }) => "Cursor::ResolveFailed",
        Msg::Panel(PanelMsg::RowActivated { .. }) => "Panel::RowActivated",
        Msg::Document(DocumentMsg::Changed { .. }) => "Document::Changed",
        Msg::Lifecycle(LifecycleMsg::ProjectOpened(_)) => "Lifecycle::ProjectOpened",
        Msg::Lifecycle(LifecycleMsg::ProjectClosed(_)) => "Lifecycle::ProjectClosed",
        Msg::Lifecycle(LifecycleMsg::EditorCreated(_)) => "Lifecycle::EditorCreated",
        Msg::Lifecycle(LifecycleMsg::EditorReleased(_)) => "Lifecycle::EditorReleased",
    }
}
