//! Scope panel update handlers

use crate::commands::Cmd;
use crate::messages::PanelMsg;
use crate::model::AppModel;

/// Handle scope panel messages
pub fn update_panel(model: &mut AppModel, msg: PanelMsg) -> Option<Cmd> {
    match msg {
        PanelMsg::RowActivated { project, index, at } => {
            let Some(panel) = model.panels.get_mut(&project) else {
                tracing::warn!("Row activated on unknown project {}", project.0);
                return None;
            };
            let Some((editor, offset)) = panel.select(index) else {
                tracing::trace!("Row {} is not activatable", index);
                return None;
            };
            let Some(watched) = model.editors.get_mut(&editor) else {
                tracing::debug!("Editor {} released, ignoring row activation", editor.0);
                return None;
            };

            // The caret jump below fires its own caret event; the cooldown keeps
            // it from replacing the rows the user is clicking through
            watched.watch.note_activation(at);
            watched.caret = offset;
            Some(Cmd::MoveCaret { editor, offset })
        }
    }
}
