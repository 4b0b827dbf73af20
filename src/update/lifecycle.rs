//! Project and editor lifecycle update handlers

use crate::commands::Cmd;
use crate::messages::LifecycleMsg;
use crate::model::{AppModel, WatchedEditor};
use crate::syntax::{is_spec_path, SpecDocument};

/// Handle lifecycle messages
pub fn update_lifecycle(model: &mut AppModel, msg: LifecycleMsg) -> Option<Cmd> {
    match msg {
        LifecycleMsg::ProjectOpened(project) => {
            model.panels.entry(project).or_default();
            tracing::info!("Project {} opened, scope panel created", project.0);
            Some(Cmd::SetRows {
                project,
                rows: Vec::new(),
            })
        }

        LifecycleMsg::ProjectClosed(project) => {
            model.panels.remove(&project);
            let before = model.editors.len();
            model.editors.retain(|_, e| e.project != project);
            tracing::info!(
                "Project {} closed, released {} watched editors",
                project.0,
                before - model.editors.len()
            );
            None
        }

        LifecycleMsg::EditorCreated(info) => {
            if !is_spec_path(&info.path, &model.config.spec_suffixes) {
                tracing::debug!("Not watching {}: not a spec file", info.path.display());
                return None;
            }

            let mut document = match SpecDocument::parse(&mut model.parser, &info.text) {
                Ok(doc) => doc,
                Err(e) => {
                    tracing::warn!("Not watching {}: {}", info.path.display(), e);
                    return None;
                }
            };
            document.path = Some(info.path.clone());

            model.panels.entry(info.project).or_default();
            let watched = WatchedEditor::new(info.id, info.project, document, model.config.debounce());
            model.editors.insert(info.id, watched);
            tracing::info!("Watching cursor in {} (editor {})", info.path.display(), info.id.0);
            None
        }

        LifecycleMsg::EditorReleased(editor) => {
            let released = model.editors.remove(&editor)?;
            tracing::debug!("Released cursor watch for editor {}", editor.0);

            let panel = model.panels.get_mut(&released.project)?;
            if panel.source_editor != Some(editor) {
                return None;
            }
            panel.clear();
            Some(Cmd::SetRows {
                project: released.project,
                rows: Vec::new(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContextConfig;
    use crate::model::{EditorId, EditorInfo, ProjectId};

    fn info(id: u64, path: &str) -> EditorInfo {
        EditorInfo {
            id: EditorId(id),
            project: ProjectId(1),
            path: path.into(),
            text: "describe \"A\" do\nend\n".to_string(),
        }
    }

    #[test]
    fn test_only_spec_files_are_watched() {
        let mut model = AppModel::new(ContextConfig::default()).unwrap();
        update_lifecycle(&mut model, LifecycleMsg::ProjectOpened(ProjectId(1)));
        update_lifecycle(&mut model, LifecycleMsg::EditorCreated(info(1, "spec/user_spec.rb")));
        update_lifecycle(&mut model, LifecycleMsg::EditorCreated(info(2, "app/models/user.rb")));
        assert!(model.editor(EditorId(1)).is_some());
        assert!(model.editor(EditorId(2)).is_none());
    }

    #[test]
    fn test_project_close_releases_its_editors() {
        let mut model = AppModel::new(ContextConfig::default()).unwrap();
        update_lifecycle(&mut model, LifecycleMsg::ProjectOpened(ProjectId(1)));
        update_lifecycle(&mut model, LifecycleMsg::EditorCreated(info(1, "spec/a_spec.rb")));
        update_lifecycle(&mut model, LifecycleMsg::EditorCreated(info(2, "spec/b_spec.rb")));
        assert_eq!(model.editors_in(ProjectId(1)), vec![EditorId(1), EditorId(2)]);

        update_lifecycle(&mut model, LifecycleMsg::ProjectClosed(ProjectId(1)));
        assert!(model.editors.is_empty());
        assert!(model.panel(ProjectId(1)).is_none());
    }

    #[test]
    fn test_release_unknown_editor_is_noop() {
        let mut model = AppModel::new(ContextConfig::default()).unwrap();
        assert!(update_lifecycle(&mut model, LifecycleMsg::EditorReleased(EditorId(5))).is_none());
    }
}
