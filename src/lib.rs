//! rspec-context - scope panel for RSpec files
//!
//! Given a cursor position in a spec file, computes the `let`/`let!`/`subject`
//! bindings, `before` hooks and `describe`/`context`/`it` breadcrumb in scope,
//! and presents them as panel rows. Structured as an Elm-style core
//! (messages, update, commands) driven by a small runtime with one worker
//! thread for debounce timers and resolution.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod debounce;
pub mod error;
pub mod fs_watcher;
pub mod host;
pub mod lifecycle;
pub mod messages;
pub mod model;
pub mod panel;
pub mod runtime;
pub mod scope;
pub mod syntax;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::ContextConfig;
pub use debounce::{DebounceConfig, DebounceScheduler};
pub use error::{Error, Result};
pub use messages::Msg;
pub use model::AppModel;
pub use panel::{to_rows, DisplayRow, ScopePanel};
pub use scope::{resolve, ResolvedContext};
