//! Display rows for the scope panel

use serde::Serialize;

use crate::scope::{Binding, BindingKind, GroupDescriptor, ResolvedContext, SetupHook};

/// Separator between breadcrumb levels
pub const BREADCRUMB_SEPARATOR: &str = " > ";

/// One row of the scope panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "item", rename_all = "snake_case")]
pub enum DisplayRow {
    Binding(Binding),
    Divider,
    SetupHook(SetupHook),
    Breadcrumb(Vec<GroupDescriptor>),
}

impl DisplayRow {
    /// Where activating this row moves the caret
    ///
    /// The breadcrumb jumps to its innermost group. Dividers are inert.
    pub fn source_offset(&self) -> Option<usize> {
        match self {
            DisplayRow::Binding(binding) => Some(binding.source_offset),
            DisplayRow::SetupHook(hook) => Some(hook.source_offset),
            DisplayRow::Breadcrumb(groups) => groups.last().map(|g| g.source_offset),
            DisplayRow::Divider => None,
        }
    }

    pub fn is_activatable(&self) -> bool {
        self.source_offset().is_some()
    }

    /// Single-line label as shown in the list
    pub fn label(&self) -> String {
        match self {
            DisplayRow::Binding(binding) => binding_label(binding),
            DisplayRow::SetupHook(hook) => single_line(&hook.text),
            DisplayRow::Breadcrumb(groups) => breadcrumb_label(groups),
            DisplayRow::Divider => String::new(),
        }
    }
}

/// Flatten a resolved context into panel rows
///
/// Bindings come first in name order, then a divider, the hooks in execution
/// order, another divider and a single breadcrumb row.
pub fn to_rows(context: &ResolvedContext) -> Vec<DisplayRow> {
    let mut rows = Vec::with_capacity(context.bindings.len() + context.hooks.len() + 3);
    rows.extend(context.bindings.values().cloned().map(DisplayRow::Binding));
    rows.push(DisplayRow::Divider);
    rows.extend(context.hooks.iter().cloned().map(DisplayRow::SetupHook));
    rows.push(DisplayRow::Divider);
    rows.push(DisplayRow::Breadcrumb(context.breadcrumb.clone()));
    rows
}

fn binding_label(binding: &Binding) -> String {
    let body = single_line(&binding.body);
    let body = if body.is_empty() {
        "{ }".to_string()
    } else {
        format!("{{ {} }}", body)
    };
    match binding.kind {
        BindingKind::Subject => format!("{} {}", binding.kind.keyword(), body),
        BindingKind::Memoized | BindingKind::MemoizedBang => {
            format!("{}({}) {}", binding.kind.keyword(), binding.name, body)
        }
    }
}

pub fn breadcrumb_label(groups: &[GroupDescriptor]) -> String {
    groups
        .iter()
        .map(|g| g.label.as_str())
        .collect::<Vec<_>>()
        .join(BREADCRUMB_SEPARATOR)
}

/// Collapse multi-line text: each line trimmed, joined with "; "
fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}
