//! Extension configuration persistence
//!
//! Stores user preferences in `~/.config/rspec-context/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::debounce::{DebounceConfig, DEFAULT_ACTIVATION_COOLDOWN_MS, DEFAULT_QUIESCENCE_MS};
use crate::error::{Error, Result};

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Quiet period before a cursor burst triggers a resolve
    #[serde(default = "default_quiescence_ms")]
    pub quiescence_ms: u64,

    /// How long resolves stay suppressed after a panel row is activated
    #[serde(default = "default_activation_cooldown_ms")]
    pub activation_cooldown_ms: u64,

    /// File name suffixes that mark a file as a spec
    #[serde(default = "default_spec_suffixes")]
    pub spec_suffixes: Vec<String>,
}

fn default_quiescence_ms() -> u64 {
    DEFAULT_QUIESCENCE_MS
}

fn default_activation_cooldown_ms() -> u64 {
    DEFAULT_ACTIVATION_COOLDOWN_MS
}

fn default_spec_suffixes() -> Vec<String> {
    ["_spec.rb", "spec.rb", "shared.rb"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            quiescence_ms: default_quiescence_ms(),
            activation_cooldown_ms: default_activation_cooldown_ms(),
            spec_suffixes: default_spec_suffixes(),
        }
    }
}

impl ContextConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file
    ///
    /// A missing file gives defaults quietly; an unreadable or malformed one
    /// gives defaults with a warning.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::read(path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let path = crate::config_paths::config_file().ok_or(Error::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Timing parameters for per-editor debounce schedulers
    pub fn debounce(&self) -> DebounceConfig {
        DebounceConfig {
            quiescence: std::time::Duration::from_millis(self.quiescence_ms),
            activation_cooldown: std::time::Duration::from_millis(self.activation_cooldown_ms),
        }
    }
}
