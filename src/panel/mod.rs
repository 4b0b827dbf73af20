//! Scope panel presentation
//!
//! One panel per project. It shows the rows computed for whichever watched
//! editor last resolved, and translates row activation into a caret jump.
//!
//! ## Architecture
//!
//! - `DisplayRow`: Binding, Divider, SetupHook or Breadcrumb
//! - `to_rows()`: flattens a `ResolvedContext` into the fixed row layout
//! - `ScopePanel`: current rows, selection and the editor they came from

mod rows;

pub use rows::{breadcrumb_label, to_rows, DisplayRow, BREADCRUMB_SEPARATOR};

use crate::model::EditorId;

/// Title of the side panel
pub const PANEL_TITLE: &str = "RSpec Context";

/// Per-project panel state
#[derive(Debug, Clone, Default)]
pub struct ScopePanel {
    rows: Vec<DisplayRow>,
    pub selected_index: Option<usize>,
    /// Editor whose resolution produced the current rows
    pub source_editor: Option<EditorId>,
}

impl ScopePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    /// Replace the rows; selection does not survive a refresh
    pub fn set_rows(&mut self, editor: EditorId, rows: Vec<DisplayRow>) {
        self.rows = rows;
        self.source_editor = Some(editor);
        self.selected_index = None;
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.source_editor = None;
        self.selected_index = None;
    }

    /// Select a row and return the caret target, if the row has one
    pub fn select(&mut self, index: usize) -> Option<(EditorId, usize)> {
        let row = self.rows.get(index)?;
        let offset = row.source_offset()?;
        let editor = self.source_editor?;
        self.selected_index = Some(index);
        Some((editor, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::{Binding, BindingKind, ResolvedContext};

    fn panel_with_binding(offset: usize) -> ScopePanel {
        let mut context = ResolvedContext::default();
        context.bindings.insert(
            "x".to_string(),
            Binding {
                kind: BindingKind::Memoized,
                name: "x".to_string(),
                body: "1".to_string(),
                source_offset: offset,
            },
        );
        let mut panel = ScopePanel::new();
        panel.set_rows(EditorId(7), to_rows(&context));
        panel
    }

    #[test]
    fn test_select_binding_returns_target() {
        let mut panel = panel_with_binding(12);
        assert_eq!(panel.select(0), Some((EditorId(7), 12)));
        assert_eq!(panel.selected_index, Some(0));
    }

    #[test]
    fn test_select_divider_or_out_of_range_is_ignored() {
        let mut panel = panel_with_binding(12);
        assert_eq!(panel.select(1), None);
        assert_eq!(panel.select(99), None);
        assert_eq!(panel.selected_index, None);
    }

    #[test]
    fn test_refresh_clears_selection() {
        let mut panel = panel_with_binding(12);
        panel.select(0);
        panel.set_rows(EditorId(7), Vec::new());
        assert_eq!(panel.selected_index, None);
        assert!(panel.rows().is_empty());
    }
}
