//! Background worker: debounce timers and scope resolution
//!
//! A single long-lived thread owns every armed timer (one deadline per
//! editor) and runs resolutions between wakeups. Results go back to the
//! interactive side as messages.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::messages::{CursorMsg, Msg};
use crate::model::EditorId;
use crate::scope;
use crate::syntax::SyntaxTree;

/// Work submitted to the worker thread
#[derive(Debug)]
pub(super) enum Job {
    /// Arm (or re-arm) the editor's timer
    Arm { editor: EditorId, delay: Duration },
    Resolve {
        editor: EditorId,
        revision: u64,
        tree: Arc<SyntaxTree>,
        offset: usize,
    },
}

pub(super) struct Worker {
    jobs: Option<Sender<Job>>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    pub(super) fn spawn(msg_tx: Sender<Msg>) -> std::io::Result<Self> {
        let (jobs, rx) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("rspec-context-worker".to_string())
            .spawn(move || run(rx, msg_tx))?;
        Ok(Self {
            jobs: Some(jobs),
            handle: Some(handle),
        })
    }

    /// Queue a job; false when the worker has stopped
    pub(super) fn submit(&self, job: Job) -> bool {
        self.jobs.as_ref().is_some_and(|tx| tx.send(job).is_ok())
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Closing the job channel ends the worker loop
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("Worker thread panicked during shutdown");
            }
        }
    }
}

fn run(rx: Receiver<Job>, msg_tx: Sender<Msg>) {
    let mut deadlines: HashMap<EditorId, Instant> = HashMap::new();

    loop {
        let job = match deadlines.values().min().copied() {
            Some(next) => match rx.recv_timeout(next.saturating_duration_since(Instant::now())) {
                Ok(job) => Some(job),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            },
            None => match rx.recv() {
                Ok(job) => Some(job),
                Err(_) => break,
            },
        };

        match job {
            Some(Job::Arm { editor, delay }) => {
                deadlines.insert(editor, Instant::now() + delay);
            }
            Some(Job::Resolve {
                editor,
                revision,
                tree,
                offset,
            }) => {
                if msg_tx.send(resolve_job(editor, revision, &tree, offset)).is_err() {
                    break;
                }
            }
            None => {}
        }

        let now = Instant::now();
        let due: Vec<EditorId> = deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(editor, _)| *editor)
            .collect();
        for editor in due {
            deadlines.remove(&editor);
            let msg = Msg::Cursor(CursorMsg::DebounceElapsed { editor, at: now });
            if msg_tx.send(msg).is_err() {
                return;
            }
        }
    }

    tracing::debug!("Worker stopped with {} timers armed", deadlines.len());
}

/// Resolve on this thread; a panic becomes a failure message
fn resolve_job(editor: EditorId, revision: u64, tree: &SyntaxTree, offset: usize) -> Msg {
    let result = panic::catch_unwind(AssertUnwindSafe(|| scope::resolve(tree, offset)));
    let at = Instant::now();
    match result {
        Ok(context) => Msg::Cursor(CursorMsg::ResolveCompleted {
            editor,
            revision,
            context,
            at,
        }),
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            tracing::error!("Resolve panicked for editor {}: {}", editor.0, reason);
            Msg::Cursor(CursorMsg::ResolveFailed { editor, reason, at })
        }
    }
}

pub(super) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
