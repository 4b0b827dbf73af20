//! Document update handlers

use super::cursor::cursor_moved;
use crate::commands::Cmd;
use crate::messages::DocumentMsg;
use crate::model::AppModel;

/// Handle document messages
pub fn update_document(model: &mut AppModel, msg: DocumentMsg) -> Option<Cmd> {
    match msg {
        DocumentMsg::Changed { editor, text, at } => {
            let Some(watched) = model.editors.get_mut(&editor) else {
                return None;
            };
            if let Err(e) = watched.document.set_text(&mut model.parser, &text) {
                tracing::warn!("Failed to re-parse editor {}: {}", editor.0, e);
                return None;
            }
            watched.caret = watched.caret.min(watched.document.len_bytes());

            // New text can change what is in scope at an unmoved caret
            cursor_moved(watched, at)
        }
    }
}
