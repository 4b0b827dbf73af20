//! Host lifecycle integration
//!
//! The host reports project and editor lifecycle events to an
//! [`ExtensionHost`], which fans them out to installed extensions. Failures in
//! one extension are logged and never reach the host or the other extensions.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::mpsc::Sender;

use anyhow::anyhow;

use crate::messages::{LifecycleMsg, Msg};
use crate::model::{EditorId, EditorInfo, ProjectId};

/// Lifecycle events reported by the host
#[derive(Debug, Clone)]
pub enum LifecycleEvent {
    ProjectOpened(ProjectId),
    ProjectClosed(ProjectId),
    EditorCreated(EditorInfo),
    EditorReleased(EditorId),
}

/// A plugin that reacts to host lifecycle events
pub trait Extension {
    fn name(&self) -> &str;

    fn on_project_opened(&mut self, _project: ProjectId) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_project_closed(&mut self, _project: ProjectId) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_editor_created(&mut self, _info: &EditorInfo) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_editor_released(&mut self, _editor: EditorId) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Dispatches lifecycle events to installed extensions
///
/// Tracks open projects and live editors so that uninstalling can replay
/// the matching release and close events.
#[derive(Default)]
pub struct ExtensionHost {
    extensions: Vec<Box<dyn Extension>>,
    open_projects: BTreeSet<ProjectId>,
    live_editors: BTreeMap<EditorId, ProjectId>,
}

impl ExtensionHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&mut self, extension: Box<dyn Extension>) {
        tracing::info!("Installed extension {}", extension.name());
        self.extensions.push(extension);
    }

    pub fn extension_count(&self) -> usize {
        self.extensions.len()
    }

    pub fn dispatch(&mut self, event: LifecycleEvent) {
        match &event {
            LifecycleEvent::ProjectOpened(project) => {
                self.open_projects.insert(*project);
            }
            LifecycleEvent::ProjectClosed(project) => {
                self.open_projects.remove(project);
                self.live_editors.retain(|_, p| p != project);
            }
            LifecycleEvent::EditorCreated(info) => {
                self.live_editors.insert(info.id, info.project);
            }
            LifecycleEvent::EditorReleased(editor) => {
                self.live_editors.remove(editor);
            }
        }

        for extension in &mut self.extensions {
            let result = match &event {
                LifecycleEvent::ProjectOpened(project) => extension.on_project_opened(*project),
                LifecycleEvent::ProjectClosed(project) => extension.on_project_closed(*project),
                LifecycleEvent::EditorCreated(info) => extension.on_editor_created(info),
                LifecycleEvent::EditorReleased(editor) => extension.on_editor_released(*editor),
            };
            if let Err(e) = result {
                tracing::error!("Extension {} failed on {:?}: {:#}", extension.name(), event, e);
            }
        }
    }

    /// Release every live editor and close every open project, then drop the extensions
    pub fn uninstall_all(&mut self) {
        let editors: Vec<EditorId> = self.live_editors.keys().copied().collect();
        for editor in editors {
            self.dispatch(LifecycleEvent::EditorReleased(editor));
        }
        let projects: Vec<ProjectId> = self.open_projects.iter().copied().collect();
        for project in projects {
            self.dispatch(LifecycleEvent::ProjectClosed(project));
        }
        for extension in self.extensions.drain(..) {
            tracing::info!("Uninstalled extension {}", extension.name());
        }
    }
}

/// Forwards lifecycle events into the runtime's message channel
pub struct SpecContextExtension {
    tx: Sender<Msg>,
}

impl SpecContextExtension {
    pub fn new(tx: Sender<Msg>) -> Self {
        Self { tx }
    }

    fn send(&self, msg: LifecycleMsg) -> anyhow::Result<()> {
        self.tx
            .send(Msg::Lifecycle(msg))
            .map_err(|_| anyhow!("runtime message channel is closed"))
    }
}

impl Extension for SpecContextExtension {
    fn name(&self) -> &str {
        "rspec-context"
    }

    fn on_project_opened(&mut self, project: ProjectId) -> anyhow::Result<()> {
        self.send(LifecycleMsg::ProjectOpened(project))
    }

    fn on_project_closed(&mut self, project: ProjectId) -> anyhow::Result<()> {
        self.send(LifecycleMsg::ProjectClosed(project))
    }

    fn on_editor_created(&mut self, info: &EditorInfo) -> anyhow::Result<()> {
        self.send(LifecycleMsg::EditorCreated(info.clone()))
    }

    fn on_editor_released(&mut self, editor: EditorId) -> anyhow::Result<()> {
        self.send(LifecycleMsg::EditorReleased(editor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    struct Failing;

    impl Extension for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn on_project_opened(&mut self, _project: ProjectId) -> anyhow::Result<()> {
            Err(anyhow!("nope"))
        }
    }

    #[test]
    fn test_failing_extension_does_not_block_others() {
        let (tx, rx) = mpsc::channel();
        let mut host = ExtensionHost::new();
        host.install(Box::new(Failing));
        host.install(Box::new(SpecContextExtension::new(tx)));

        host.dispatch(LifecycleEvent::ProjectOpened(ProjectId(1)));
        assert!(matches!(
            rx.try_recv(),
            Ok(Msg::Lifecycle(LifecycleMsg::ProjectOpened(ProjectId(1))))
        ));
    }

    #[test]
    fn test_closed_channel_is_reported_not_panicked() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut ext = SpecContextExtension::new(tx);
        assert!(ext.on_project_opened(ProjectId(1)).is_err());
    }
}
