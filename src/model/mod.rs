//! Application model - the complete state of the extension
//!
//! Following the Elm Architecture, everything the update functions touch
//! lives here. Host-owned state (the real caret, the real list widget) is
//! mirrored through messages and changed back through commands.

pub mod editor;

pub use editor::{EditorId, EditorInfo, ProjectId, WatchedEditor};

use std::collections::HashMap;

use crate::config::ContextConfig;
use crate::error::Result;
use crate::panel::ScopePanel;
use crate::syntax::SpecParser;

/// The complete application model
#[derive(Debug)]
pub struct AppModel {
    pub config: ContextConfig,
    /// Parser used on the interactive side when documents open or change
    pub parser: SpecParser,
    /// Spec editors with a cursor watch, keyed by editor
    pub editors: HashMap<EditorId, WatchedEditor>,
    /// One panel per open project
    pub panels: HashMap<ProjectId, ScopePanel>,
}

impl AppModel {
    pub fn new(config: ContextConfig) -> Result<Self> {
        Ok(Self {
            config,
            parser: SpecParser::new()?,
            editors: HashMap::new(),
            panels: HashMap::new(),
        })
    }

    pub fn editor(&self, id: EditorId) -> Option<&WatchedEditor> {
        self.editors.get(&id)
    }

    pub fn panel(&self, project: ProjectId) -> Option<&ScopePanel> {
        self.panels.get(&project)
    }

    /// Editors belonging to a project
    pub fn editors_in(&self, project: ProjectId) -> Vec<EditorId> {
        let mut ids: Vec<_> = self
            .editors
            .values()
            .filter(|e| e.project == project)
            .map(|e| e.id)
            .collect();
        ids.sort();
        ids
    }
}
