//! Runtime: drives update and applies commands
//!
//! The interactive side owns the model and calls into the runtime from the
//! host's event loop. Timers and resolutions run on the worker; their results
//! come back over the message channel and are drained with
//! [`Runtime::process_async_messages`].

mod worker;

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use crate::commands::Cmd;
use crate::config::ContextConfig;
use crate::error::Result;
use crate::host::Host;
use crate::messages::{CursorMsg, Msg, PanelMsg};
use crate::model::{AppModel, EditorId, ProjectId};
use crate::update::update;

use self::worker::{panic_message, Job, Worker};

pub struct Runtime {
    model: AppModel,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    worker: Worker,
}

impl Runtime {
    pub fn new(config: ContextConfig) -> Result<Self> {
        let (msg_tx, msg_rx) = mpsc::channel();
        let model = AppModel::new(config)?;
        let worker = Worker::spawn(msg_tx.clone())?;
        Ok(Self {
            model,
            msg_tx,
            msg_rx,
            worker,
        })
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    /// Sender for messages produced outside the runtime (lifecycle hooks, watchers)
    pub fn sender(&self) -> Sender<Msg> {
        self.msg_tx.clone()
    }

    /// Run a message through update and apply the resulting command
    pub fn dispatch(&mut self, msg: Msg, host: &mut dyn Host) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd, host);
        }
    }

    /// The host's caret moved; read it from the editor surface
    pub fn cursor_moved(&mut self, editor: EditorId, host: &mut dyn Host) {
        let Some(surface) = host.editor(editor) else {
            return;
        };
        let offset = surface.caret_offset();
        let msg = Msg::Cursor(CursorMsg::Moved {
            editor,
            offset,
            at: Instant::now(),
        });
        self.dispatch(msg, host);
    }

    /// The user activated a row in a project's panel
    pub fn row_activated(&mut self, project: ProjectId, index: usize, host: &mut dyn Host) {
        let msg = Msg::Panel(PanelMsg::RowActivated {
            project,
            index,
            at: Instant::now(),
        });
        self.dispatch(msg, host);
    }

    /// Drain pending async messages; returns how many were handled
    pub fn process_async_messages(&mut self, host: &mut dyn Host) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            handled += 1;
            self.dispatch(msg, host);
        }
        handled
    }

    /// Block up to `timeout` for the next message, then drain the rest
    pub fn wait_for_messages(&mut self, timeout: Duration, host: &mut dyn Host) -> usize {
        match self.msg_rx.recv_timeout(timeout) {
            Ok(msg) => {
                self.dispatch(msg, host);
                1 + self.process_async_messages(host)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => 0,
        }
    }

    fn process_cmd(&self, cmd: Cmd, host: &mut dyn Host) {
        match cmd {
            Cmd::None => {}
            Cmd::ScheduleTimer { editor, delay } => {
                if !self.worker.submit(Job::Arm { editor, delay }) {
                    tracing::warn!("Worker stopped, dropping timer for editor {}", editor.0);
                }
            }
            Cmd::RunResolve {
                editor,
                revision,
                tree,
                offset,
            } => {
                let job = Job::Resolve {
                    editor,
                    revision,
                    tree,
                    offset,
                };
                if !self.worker.submit(job) {
                    // Report back so the editor's watch does not stay in flight
                    let _ = self.msg_tx.send(Msg::Cursor(CursorMsg::ResolveFailed {
                        editor,
                        reason: "worker stopped".to_string(),
                        at: Instant::now(),
                    }));
                }
            }
            Cmd::SetRows { project, rows } => guarded("set rows", || {
                if let Some(view) = host.list_view(project) {
                    view.set_rows(&rows);
                }
            }),
            Cmd::MoveCaret { editor, offset } => guarded("move caret", || {
                if let Some(surface) = host.editor(editor) {
                    surface.move_caret_to(offset);
                    surface.scroll_caret_into_view();
                }
            }),
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd, host);
                }
            }
        }
    }
}

/// Run a host effect; a panic in host code is logged and swallowed
fn guarded(effect: &str, f: impl FnOnce()) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(f)) {
        tracing::error!("Host {} panicked: {}", effect, panic_message(payload.as_ref()));
    }
}
