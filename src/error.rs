//! Typed errors for the parts of the crate that can fail
//!
//! Resolution itself never fails; these cover parsing, config files and
//! the file watcher used by the CLI host.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Tree-sitter could not be configured or returned no tree
    #[error("parse failed: {reason}")]
    ParseFailed { reason: String },

    /// Underlying I/O error from the filesystem
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// A config file exists but is not valid YAML for [`crate::ContextConfig`]
    #[error("config parse failed: {}: {reason}", path.display())]
    ConfigParse { path: PathBuf, reason: String },

    /// The config could not be serialized for saving
    #[error("config serialize failed: {0}")]
    ConfigSerialize(#[from] serde_yaml::Error),

    /// Neither XDG_CONFIG_HOME nor a home directory is available
    #[error("no config directory available")]
    NoConfigDir,

    /// The file watcher could not be started
    #[error("watch failed: {0}")]
    Watch(#[from] notify::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
