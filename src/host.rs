//! Host editor surfaces
//!
//! The extension never owns an editor or a list widget. The runtime reaches
//! them through these traits when applying commands.

use crate::model::{EditorId, ProjectId};
use crate::panel::DisplayRow;

/// A text editor the host exposes
pub trait EditorSurface {
    /// Current caret position as a byte offset
    fn caret_offset(&self) -> usize;
    fn move_caret_to(&mut self, offset: usize);
    fn scroll_caret_into_view(&mut self);
}

/// The list widget inside a project's scope panel
pub trait ListView {
    fn set_rows(&mut self, rows: &[DisplayRow]);
}

/// Lookup of host surfaces by identifier
pub trait Host {
    fn editor(&mut self, id: EditorId) -> Option<&mut dyn EditorSurface>;
    fn list_view(&mut self, project: ProjectId) -> Option<&mut dyn ListView>;
}
